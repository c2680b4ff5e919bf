#![no_main]
use libfuzzer_sys::fuzz_target;

use uniqcov::model::CoverageReport;

fuzz_target!(|data: &[u8]| {
    // Split the input into a baseline and a test report; subtraction must
    // not panic on anything that deserializes.
    let mid = data.len() / 2;
    let (Ok(baseline), Ok(test)) = (
        serde_json::from_slice::<CoverageReport>(&data[..mid]),
        serde_json::from_slice::<CoverageReport>(&data[mid..]),
    ) else {
        return;
    };
    let unique = uniqcov::subtract::subtract(&baseline, &test);
    assert!(unique.unique_file_count <= test.source_files.len());
});
