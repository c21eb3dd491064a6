#![no_main]

use libfuzzer_sys::fuzz_target;
use rsrcdev::{
    resources::{ResourceType, file::RsrcFile},
    utils::testing::RsrcBuilder,
};

// Input: a target index byte, then payloads separated by 0x00 bytes. The
// last payload replaces the selected resource.
fuzz_target!(|data: &[u8]| {
    let Some((&target, rest)) = data.split_first() else {
        return;
    };
    let mut chunks: Vec<&[u8]> = rest.split(|&b| b == 0).collect();
    let Some(new_payload) = chunks.pop() else {
        return;
    };
    if chunks.is_empty() || chunks.len() > 64 {
        return;
    }

    let mut builder = RsrcBuilder::new();
    for (id, chunk) in (1u16..).zip(&chunks) {
        builder = builder.resource(ResourceType::Text, id, chunk.to_vec());
    }
    let mut file = RsrcFile::load(builder.build().bytes).unwrap();

    let id = u16::from(target) % u16::try_from(chunks.len()).unwrap() + 1;
    file.replace_data(id, ResourceType::Text, new_payload).unwrap();

    let reloaded = RsrcFile::load(file.export_bytes()).unwrap();
    assert_eq!(reloaded.table(), file.table());
    for (other, chunk) in (1u16..).zip(&chunks) {
        let expected = if other == id { new_payload } else { chunk };
        assert_eq!(reloaded.read_data(other, ResourceType::Text).unwrap(), expected);
    }
});
