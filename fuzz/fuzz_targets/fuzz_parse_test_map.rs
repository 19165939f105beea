#![no_main]
use libfuzzer_sys::fuzz_target;
use test_review::projection::{project, ProjectOptions, ReviewFilter};

/// Fuzz test-map parsing and projection.
///
/// Any map that deserializes must project and filter without panicking,
/// however inconsistent its ids, positions and scores are.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(map) = test_review::TestMap::from_json_str(s) {
            let _ = test_review::collect_warnings(&map);
            let root = project(&map, ProjectOptions::default());
            for filter in ReviewFilter::ALL {
                let _ = test_review::projection::apply_filter(&root.parts, filter);
            }
        }
    }
});
