#![no_main]

use libfuzzer_sys::fuzz_target;
use rsrcdev::resources::file::RsrcFile;

fuzz_target!(|data: &[u8]| {
    let Ok(file) = RsrcFile::load(data.to_vec()) else {
        return;
    };
    for res in file.table() {
        let payload = file.read_data(res.id(), res.res_type()).unwrap();
        let range = file.offset_range(res.id(), res.res_type()).unwrap();
        assert_eq!(payload.len(), range.length());
    }
});
