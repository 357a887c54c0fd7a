use std::io::Cursor;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tandem_pin::converter::TandemConverter;
use tandem_pin::options::ParseOptions;
use tandem_pin::sink::{MemorySink, PinWriter};
use tandem_pin::tandem::TandemStreamer;

const PEPTIDES: [&str; 4] = ["PEPTIDEK", "LGEEHFK", "DLGEEHFKGLVLIAFSQYLQQCPFDEHVK", "S*AEVLNR"];

fn generate_test_tandem(num_spectra: usize, domains_per_spectrum: usize) -> Vec<u8> {
    let mut xml = String::from(
        r#"<?xml version="1.0"?>
<bioml xmlns:GAML="http://www.bioml.com/gaml/" label="models from 'bench.mgf'">"#,
    );

    for i in 0..num_spectra {
        let z = 2 + i % 3;
        xml.push_str(&format!(
            r#"
<group id="{}" mh="{:.4}" z="{}" expect="0.001" label="scan {}" type="model" sumI="6.2" maxI="21567" fI="215.6" act="0">"#,
            i + 1,
            900.0 + (i as f64) * 0.37,
            z,
            i + 1
        ));
        for j in 0..domains_per_spectrum {
            let seq = PEPTIDES[(i + j) % PEPTIDES.len()];
            xml.push_str(&format!(
                r#"
<protein expect="-50.0" id="{i}.{j}" uid="{j}" label="sp|P{j:05}|BENCH" sumI="5.1">
<peptide start="1" end="500">
<domain id="{i}.{j}.1" start="20" end="{end}" expect="0.01" mh="{mh:.4}" delta="0.012" hyperscore="{hs:.1}" nextscore="21.0" y_score="10.2" y_ions="5" b_score="8.3" b_ions="3" pre="VLSK" post="GLVL" seq="{seq}" missed_cleavages="0">
<aa type="C" at="21" modified="57.02146" />
</domain>
</peptide>
</protein>"#,
                end = 20 + seq.len() - 1,
                mh = 899.5 + (i as f64) * 0.37,
                hs = 45.0 - j as f64,
            ));
        }
        xml.push_str(
            r#"
<group label="fragment ion mass spectrum" type="support"><note label="Description">bench</note></group>
</group>"#,
        );
    }

    xml.push_str(
        r#"
<group label="input parameters" type="parameters"><note type="input" label="output, path">bench.t.xml</note></group>
</bioml>
"#,
    );
    xml.into_bytes()
}

fn options() -> ParseOptions {
    ParseOptions {
        hits_per_spectrum: 3,
        calc_ptms: true,
        calc_aa_frequencies: true,
        ..Default::default()
    }
    .with_ptm_scheme("*:21")
    .unwrap()
}

fn bench_streamer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tandem_streamer_groups");

    for num_spectra in [100, 1000] {
        let bytes = Arc::new(generate_test_tandem(num_spectra, 5));

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_spectra), &bytes, |b, bytes| {
            b.iter(|| {
                let streamer = TandemStreamer::new(Cursor::new(bytes.as_slice())).unwrap();
                let domains: usize = streamer
                    .groups()
                    .map(|group| group.unwrap().domains().count())
                    .sum();
                black_box(domains);
            });
        });
    }

    group.finish();
}

fn bench_two_pass_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("tandem_conversion");
    let converter = TandemConverter::new(options()).unwrap();

    for num_spectra in [100, 1000] {
        let bytes = Arc::new(generate_test_tandem(num_spectra, 5));

        group.throughput(Throughput::Elements(num_spectra as u64));
        group.bench_with_input(
            BenchmarkId::new("memory", num_spectra),
            &bytes,
            |b, bytes| {
                b.iter(|| {
                    let mut sink = MemorySink::new();
                    converter
                        .convert_bytes("bench", bytes.as_slice(), false, &mut sink)
                        .unwrap();
                    black_box(sink.len());
                });
            },
        );
        group.bench_with_input(BenchmarkId::new("pin", num_spectra), &bytes, |b, bytes| {
            b.iter(|| {
                let mut writer = PinWriter::new(Vec::with_capacity(bytes.len()));
                converter
                    .convert_bytes("bench", bytes.as_slice(), false, &mut writer)
                    .unwrap();
                black_box(writer.finish().unwrap().len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_streamer, bench_two_pass_conversion);
criterion_main!(benches);
