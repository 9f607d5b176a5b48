#![no_main]
use libfuzzer_sys::fuzz_target;

use dibloader::{DecodeRequest, Permissiveness};

fuzz_target!(|data: &[u8]| {
    // Every permissiveness level must reject or decode without panicking
    for permissiveness in [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ] {
        let request = DecodeRequest::new(data).with_permissiveness(permissiveness);
        let _ = request.probe();
        if let Ok(image) = request.decode() {
            assert_eq!(
                image.pixels().len(),
                image.width() as usize * image.height() as usize * 4
            );
            assert_eq!(
                image.alpha_channel().len(),
                image.width() as usize * image.height() as usize
            );
        }
    }
});
