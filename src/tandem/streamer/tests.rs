use super::*;
use crate::tandem::IonChannel;
use std::io::Cursor;

const MINIMAL_TANDEM: &str = r#"<?xml version="1.0"?>
<?xml-stylesheet type="text/xsl" href="tandem-style.xsl"?>
<bioml xmlns:GAML="http://www.bioml.com/gaml/" label="models from 'test.mgf'">
<group id="17" mh="1234.5678" z="2" rt="" expect="1.2e-05" label="scan 17" type="model" sumI="6.12" maxI="215670" fI="2156.7" act="0" >
<protein expect="-240.0" id="17.1" uid="1" label="sp|P02769|ALBU_BOVIN &amp; more" sumI="8.54" >
<note label="description">sp|P02769|ALBU_BOVIN</note>
<file type="peptides" URL="bovine.fasta"/>
<peptide start="1" end="607">
MKWVTFISLLLLFSSAYSRGVFRRDTHKSEIAHRFKDLGEEHFKGLVLIAFSQYLQQCPF
<domain id="17.1.1" start="35" end="44" expect="1.2e-05" mh="1233.5612" delta="1.0066" hyperscore="45.2" nextscore="30.1" y_score="12.3" y_ions="7" b_score="8.1" b_ions="4" a_score="2.0" pre="SEIA" post="FKDL" seq="HRFKDLGEEH" missed_cleavages="1">
<aa type="M" at="40" modified="15.99491" />
</domain>
</peptide>
</protein>
<group label="fragment ion mass spectrum" type="support">
<note label="Description">scan 17</note>
<GAML:trace id="17" label="17.spectrum" type="tandem mass spectrum">
<GAML:Xdata><GAML:values byteorder="INTEL" format="ASCII" numvalues="2">147.1 175.1</GAML:values></GAML:Xdata>
</GAML:trace>
</group>
</group>
<group label="input parameters" type="parameters">
<note type="input" label="spectrum, fragment monoisotopic mass error">0.4</note>
</group>
</bioml>
"#;

fn streamer(xml: &str) -> TandemStreamer<Cursor<Vec<u8>>> {
    TandemStreamer::new(Cursor::new(xml.as_bytes().to_vec())).unwrap()
}

#[test]
fn test_parse_minimal_tandem() {
    let mut streamer = streamer(MINIMAL_TANDEM);

    let group = streamer.next_group().unwrap().unwrap();
    assert_eq!(group.id.as_deref(), Some("17"));
    assert_eq!(group.z, Some(2));
    assert!((group.mh.unwrap() - 1234.5678).abs() < 1e-9);
    assert_eq!(group.proteins.len(), 1);

    let protein = &group.proteins[0];
    assert_eq!(protein.label, "sp|P02769|ALBU_BOVIN & more");
    assert_eq!(protein.domains.len(), 1);

    let domain = &protein.domains[0];
    assert_eq!(domain.seq.as_deref(), Some("HRFKDLGEEH"));
    assert_eq!(domain.start, Some(35));
    assert_eq!(domain.end, Some(44));
    assert_eq!(domain.pre.as_deref(), Some("SEIA"));
    assert_eq!(domain.channel(IonChannel::Y).unwrap().ions, Some(7));
    assert_eq!(domain.channel(IonChannel::B).unwrap().ions, Some(4));
    // a_score without a_ions is kept but incomplete
    let a = domain.channel(IonChannel::A).unwrap();
    assert_eq!(a.score, Some(2.0));
    assert_eq!(a.ions, None);
    assert!(!a.is_complete());
    assert!(domain.channel(IonChannel::C).is_none());
    assert_eq!(domain.modifications.len(), 1);
    assert_eq!(domain.modifications[0].at, 40);
    assert_eq!(domain.modifications[0].residue, Some('M'));
    assert_eq!(domain.modifications[0].modified, "15.99491");

    // the parameters group is skipped
    assert!(streamer.next_group().unwrap().is_none());
    assert_eq!(streamer.groups_read(), 1);
    assert_eq!(streamer.groups_skipped(), 1);
}

#[test]
fn test_rejects_non_bioml_document() {
    let mut streamer = streamer(r#"<?xml version="1.0"?><mzML><run/></mzML>"#);
    let err = streamer.next_group().unwrap_err();
    assert!(matches!(err, TandemError::InvalidStructure(_)));
}

#[test]
fn test_invalid_number_is_reported() {
    let xml = r#"<bioml><group id="1" type="model" z="two" mh="1.0"></group></bioml>"#;
    let err = streamer(xml).next_group().unwrap_err();
    match err {
        TandemError::InvalidAttributeValue { attribute, value, .. } => {
            assert_eq!(attribute, "z");
            assert_eq!(value, "two");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_truncated_group_is_an_error() {
    let xml = r#"<bioml><group id="1" type="model" z="2"><protein label="P1"><peptide>"#;
    let results: Vec<_> = streamer(xml).groups().collect();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
}

#[test]
fn test_empty_model_group() {
    let xml = r#"<bioml><group id="3" type="model" z="3" mh="900.1"/></bioml>"#;
    let groups: Vec<_> = streamer(xml).groups().collect::<Result<_, _>>().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].z, Some(3));
    assert!(!groups[0].has_domains());
}

#[test]
fn test_open_missing_file() {
    let err = TandemStreamer::open("/nonexistent/results.t.xml").err().unwrap();
    assert!(matches!(err, TandemError::FileAccess { .. }));
}
