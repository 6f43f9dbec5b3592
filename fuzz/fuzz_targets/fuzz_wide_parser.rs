#![no_main]

use genoped::{ColumnMap, Converter, ConverterOptions, InputFormat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let Ok(wide) = genoped::wide::parse_wide(&text, &ColumnMap::default(), "N") else {
        return;
    };
    assert!(wide.table.rows().iter().all(|row| row.len() == 6));

    let options = ConverterOptions {
        missing_genotype: String::from("N"),
        ..ConverterOptions::default()
    };
    let converter = Converter::new(options).unwrap();
    if let Ok(conversion) = converter.convert_text(&text, InputFormat::Wide) {
        // Every PED line carries six fixed fields and two per SNP
        let fields = 6 + 2 * conversion.output.map.len();
        for line in &conversion.output.ped {
            assert_eq!(line.split('\t').count(), fields);
        }
    }
});
