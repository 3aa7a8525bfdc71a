#![no_main]

use docsync::reconcile::CanonicalSets;
use docsync::regen::regenerate_text;
use docsync_core::vocab::syntax::SyntaxFormat;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let canonical = CanonicalSets {
        objects: vec!["cpu".to_string(), "mem".to_string()],
        configs: vec!["alignment".to_string()],
    };

    for format in [SyntaxFormat::Vim, SyntaxFormat::Nano] {
        let out = regenerate_text(s, format, &canonical);
        // Line count is preserved and a second pass is a no-op
        assert_eq!(out.text.split_inclusive('\n').count(), s.split_inclusive('\n').count());
        assert_eq!(regenerate_text(&out.text, format, &canonical).text, out.text);
    }
});
