#![no_main]
use std::error::Error;

use libfuzzer_sys::fuzz_target;
use sfnt::{
    tables::name::{Name, NameId},
    FontData, FontRead,
};

fn do_name_things(data: &[u8]) -> Result<(), Box<dyn Error>> {
    let mut name = Name::read(FontData::new(data))?;
    for entry in name.entries()? {
        let _ = entry.decoded();
        let _ = entry.label();
    }
    name.add_mac_english_entry(NameId::FAMILY_NAME, "Fuzz")?;
    let rebuilt = name.compile().to_vec();
    let reread = Name::read(FontData::new(&rebuilt))?;
    assert_eq!(reread.entries()?, name.entries()?);
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = do_name_things(data);
});
