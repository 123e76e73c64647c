#![no_main]
use std::error::Error;

use libfuzzer_sys::fuzz_target;
use sfnt::{tables::cmap::Cmap, FontData, FontRead};

const MAX_MAPPINGS: usize = 100_000;

fn do_cmap_things(data: &[u8]) -> Result<(), Box<dyn Error>> {
    let cmap = Cmap::read(FontData::new(data))?;
    for encoding in cmap.encodings() {
        let _ = encoding.to_string();
        // we don't care about the result, just that we don't panic, hang, etc
        for (cp, gid) in encoding.iter().take(MAX_MAPPINGS) {
            assert_eq!(encoding.map_codepoint(cp), Some(gid));
        }
    }
    for cp in (0..0x11_0000u32).step_by(97) {
        let _ = cmap.map_codepoint(cp);
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = do_cmap_things(data);
});
