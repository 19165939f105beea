#![no_main]
use libfuzzer_sys::fuzz_target;
use test_review::{NavigationBridge, RecordingHost, ReviewConfig, TestMap};

const MAP: &str = r#"{"parts":[{"id":"p1","position":0,"sections":[
  {"id":"s1","position":0,"items":[
    {"id":"i1","position":0,"score":1,"maxScore":1},
    {"id":"i2","position":1,"score":0,"maxScore":1},
    {"id":"i3","position":2,"informational":true}]}]}]}"#;

/// Fuzz the navigation bridge with arbitrary replay scripts.
///
/// Whatever order host events and reviewer actions arrive in, the bridge
/// must never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(steps) = test_review::bridge::parse_script(s) else {
        return;
    };
    let Ok(map) = TestMap::from_json_str(MAP) else {
        return;
    };
    let mut bridge = NavigationBridge::new(RecordingHost::new(map), ReviewConfig::default());
    bridge.start();
    for step in steps {
        let _ = bridge.apply(step);
    }
});
