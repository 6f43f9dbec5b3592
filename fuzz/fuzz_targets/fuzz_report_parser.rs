#![no_main]

use genoped::{Converter, ConverterOptions, InputFormat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    // Parsing must never panic; errors are expected for random input
    let Ok(report) = genoped::illumina::parse_report(&text) else {
        return;
    };
    assert!(report.table.rows().iter().all(|row| row.len() == report.table.columns().len()));

    let converter = Converter::new(ConverterOptions::default()).unwrap();
    if let Ok(conversion) = converter.convert_text(&text, InputFormat::Illumina) {
        assert_eq!(conversion.output.ped.len(), conversion.output.individuals.len());
    }
});
