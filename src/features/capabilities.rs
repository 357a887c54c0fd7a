use log::{debug, info};
use serde::Serialize;

use crate::tandem::{ChannelReading, IonChannel, SpectrumResult, TandemError};

/// What a result file reports, determined once before any PSM is built
///
/// Channel flags come from the first spectrum that has at least one
/// domain. A channel that only shows up in later spectra is not detected
/// and never contributes a feature for that file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectedCapabilities {
    channels: [bool; 6],
    /// Lowest precursor charge in the file
    pub min_charge: u32,
    /// Highest precursor charge in the file
    pub max_charge: u32,
}

impl DetectedCapabilities {
    /// Capabilities with an explicit channel set and charge range
    pub fn new(channels: &[IonChannel], min_charge: u32, max_charge: u32) -> Self {
        let mut flags = [false; 6];
        for channel in channels {
            flags[channel.index()] = true;
        }
        Self {
            channels: flags,
            min_charge,
            max_charge,
        }
    }

    pub fn has_channel(&self, channel: IonChannel) -> bool {
        self.channels[channel.index()]
    }

    /// Detected channels in feature order
    pub fn channels(&self) -> impl Iterator<Item = IonChannel> + '_ {
        IonChannel::ALL
            .into_iter()
            .filter(move |channel| self.has_channel(*channel))
    }

    /// Every integer charge in `[min_charge, max_charge]`
    pub fn charges(&self) -> std::ops::RangeInclusive<u32> {
        self.min_charge..=self.max_charge
    }
}

/// Scan every spectrum of a file once to find channels and the charge range
///
/// Fails on the first spectrum without a charge and on files without any
/// spectrum group.
pub fn probe<I>(groups: I, file: &str) -> Result<DetectedCapabilities, TandemError>
where
    I: IntoIterator<Item = Result<SpectrumResult, TandemError>>,
{
    let mut min_charge = u32::MAX;
    let mut max_charge = u32::MIN;
    let mut channels: Option<[bool; 6]> = None;
    let mut spectra = 0usize;

    for group in groups {
        let group = group?;
        let charge = group.z.ok_or_else(|| TandemError::MissingCharge {
            spectrum: group.id.clone(),
        })?;
        min_charge = min_charge.min(charge);
        max_charge = max_charge.max(charge);
        spectra += 1;

        if channels.is_none() && group.has_domains() {
            channels = Some(detect_channels(&group));
            debug!(
                "Ion channels detected from spectrum {}",
                group.display_id()
            );
        }
    }

    if spectra == 0 {
        return Err(TandemError::EmptyFile {
            file: file.to_string(),
        });
    }

    let capabilities = DetectedCapabilities {
        channels: channels.unwrap_or_default(),
        min_charge,
        max_charge,
    };
    info!(
        "{}: {} spectra, charges {}..={}, ion channels [{}]",
        file,
        spectra,
        min_charge,
        max_charge,
        capabilities
            .channels()
            .map(|c| c.letter().to_string())
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(capabilities)
}

fn detect_channels(group: &SpectrumResult) -> [bool; 6] {
    let mut flags = [false; 6];
    for domain in group.domains() {
        for channel in IonChannel::ALL {
            if domain
                .channel(channel)
                .is_some_and(ChannelReading::is_complete)
            {
                flags[channel.index()] = true;
            }
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tandem::{Domain, ProteinMatch};

    fn group(id: &str, z: Option<u32>, channels: &[IonChannel]) -> SpectrumResult {
        let mut domain = Domain {
            seq: Some("PEPTIDEK".to_string()),
            ..Default::default()
        };
        for channel in channels {
            domain.channels[channel.index()] = Some(ChannelReading {
                score: Some(1.0),
                ions: Some(3),
            });
        }
        SpectrumResult {
            id: Some(id.to_string()),
            z,
            proteins: vec![ProteinMatch {
                label: "P1".to_string(),
                domains: vec![domain],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_charge_range_spans_all_spectra() {
        let groups = vec![
            Ok(group("1", Some(3), &[IonChannel::Y])),
            Ok(group("2", Some(2), &[])),
            Ok(group("3", Some(5), &[])),
        ];
        let caps = probe(groups, "test").unwrap();
        assert_eq!(caps.min_charge, 2);
        assert_eq!(caps.max_charge, 5);
        assert_eq!(caps.charges().count(), 4);
    }

    #[test]
    fn test_channels_from_first_spectrum_only() {
        let groups = vec![
            Ok(group("1", Some(2), &[IonChannel::B, IonChannel::Y])),
            Ok(group("2", Some(2), &[IonChannel::A, IonChannel::B, IonChannel::Y])),
        ];
        let caps = probe(groups, "test").unwrap();
        let channels: Vec<_> = caps.channels().collect();
        assert_eq!(channels, vec![IonChannel::B, IonChannel::Y]);
        assert!(!caps.has_channel(IonChannel::A));
    }

    #[test]
    fn test_empty_spectra_do_not_latch_channels() {
        let mut empty = group("1", Some(2), &[]);
        empty.proteins.clear();
        let groups = vec![Ok(empty), Ok(group("2", Some(2), &[IonChannel::Y]))];
        let caps = probe(groups, "test").unwrap();
        assert!(caps.has_channel(IonChannel::Y));
    }

    #[test]
    fn test_incomplete_reading_does_not_detect_channel() {
        let mut first = group("1", Some(2), &[IonChannel::Y]);
        first.proteins[0].domains[0].channels[IonChannel::B.index()] = Some(ChannelReading {
            score: None,
            ions: Some(3),
        });
        let caps = probe(vec![Ok(first)], "test").unwrap();
        assert!(caps.has_channel(IonChannel::Y));
        assert!(!caps.has_channel(IonChannel::B));
    }

    #[test]
    fn test_missing_charge() {
        let groups = vec![Ok(group("1", Some(2), &[])), Ok(group("9", None, &[]))];
        match probe(groups, "test").unwrap_err() {
            TandemError::MissingCharge { spectrum } => assert_eq!(spectrum.as_deref(), Some("9")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_file() {
        let err = probe(Vec::new(), "empty.t.xml").unwrap_err();
        assert!(matches!(err, TandemError::EmptyFile { .. }));
    }
}
