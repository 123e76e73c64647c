#![no_main]
use std::error::Error;

use libfuzzer_sys::fuzz_target;
use sfnt::Parser;

fn do_parse_things(data: &[u8]) -> Result<(), Box<dyn Error>> {
    for strict in [false, true] {
        let fonts = Parser::new().strict(strict).parse_collection(data)?;
        for font in fonts {
            let _ = font.to_string();
            let _ = font.checksum();
            // anything we can read, we must be able to write and read again
            let written = font.to_otf_bytes()?;
            let reparsed = sfnt::parse(&written).expect("written font must parse");
            assert_eq!(
                font.tags().collect::<Vec<_>>(),
                reparsed.tags().collect::<Vec<_>>()
            );
        }
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = do_parse_things(data);
});
