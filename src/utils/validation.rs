// file: src/utils/validation.rs
// description: upload validation performed before any network access
// reference: input validation patterns

use crate::config::UploadConfig;
use crate::models::UploadCandidate;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    #[error("File size can't be more than {}.", megabytes(.max_bytes))]
    TooLarge { size: u64, max_bytes: u64 },

    #[error("Only .{expected} file is supported.")]
    WrongExtension { expected: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    Accepted,
    Rejected(RejectReason),
}

impl ValidationVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationVerdict::Accepted)
    }
}

/// A candidate that passed validation. Only [`Validator::accept`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedUpload(UploadCandidate);

impl AcceptedUpload {
    pub fn candidate(&self) -> &UploadCandidate {
        &self.0
    }

    pub fn into_candidate(self) -> UploadCandidate {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    config: UploadConfig,
}

impl Validator {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Size is checked before the extension; the first failing rule wins.
    pub fn validate(&self, candidate: &UploadCandidate) -> ValidationVerdict {
        if candidate.size() > self.config.max_file_size {
            debug!(
                "Rejecting {}: {} bytes exceeds {}",
                candidate.file_name(),
                candidate.size(),
                self.config.max_file_size
            );
            return ValidationVerdict::Rejected(RejectReason::TooLarge {
                size: candidate.size(),
                max_bytes: self.config.max_file_size,
            });
        }

        if candidate.extension() != Some(self.config.allowed_extension.as_str()) {
            debug!("Rejecting {}: wrong extension", candidate.file_name());
            return ValidationVerdict::Rejected(RejectReason::WrongExtension {
                expected: self.config.allowed_extension.clone(),
            });
        }

        ValidationVerdict::Accepted
    }

    pub fn accept(
        &self,
        candidate: UploadCandidate,
    ) -> std::result::Result<AcceptedUpload, RejectReason> {
        match self.validate(&candidate) {
            ValidationVerdict::Accepted => Ok(AcceptedUpload(candidate)),
            ValidationVerdict::Rejected(reason) => Err(reason),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

/// Decimal megabytes, e.g. 5000000 -> "5MB", 2500000 -> "2.5MB".
fn megabytes(bytes: &u64) -> String {
    let bytes = *bytes;
    if bytes % 1_000_000 == 0 {
        format!("{}MB", bytes / 1_000_000)
    } else {
        let value = format!("{:.2}", bytes as f64 / 1_000_000.0);
        format!("{}MB", value.trim_end_matches('0').trim_end_matches('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accepts_osu_file_within_limit() {
        let validator = Validator::default();
        let candidate = UploadCandidate::sized("map.osu", 2_000_000);
        assert_eq!(validator.validate(&candidate), ValidationVerdict::Accepted);
        assert_eq!(
            validator.validate(&UploadCandidate::sized("map.osu", 5_000_000)),
            ValidationVerdict::Accepted
        );
    }

    #[test]
    fn test_too_large_wins_regardless_of_extension() {
        let validator = Validator::default();
        for name in ["map.osu", "map.txt", "map", "map.OSU"] {
            let verdict = validator.validate(&UploadCandidate::sized(name, 6_000_000));
            assert_eq!(
                verdict,
                ValidationVerdict::Rejected(RejectReason::TooLarge {
                    size: 6_000_000,
                    max_bytes: 5_000_000
                }),
                "{}",
                name
            );
        }
        assert_eq!(
            validator
                .validate(&UploadCandidate::sized("map.osu", 5_000_001))
                .is_accepted(),
            false
        );
    }

    #[test]
    fn test_wrong_extension_within_limit() {
        let validator = Validator::default();
        for name in ["map.txt", "map.OSU", "map.osu.bak", "osu", "map.", ".osz"] {
            let verdict = validator.validate(&UploadCandidate::sized(name, 1_000));
            assert_eq!(
                verdict,
                ValidationVerdict::Rejected(RejectReason::WrongExtension {
                    expected: "osu".to_string()
                }),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_dotfile_named_osu_is_accepted() {
        let validator = Validator::default();
        assert!(validator.validate(&UploadCandidate::sized(".osu", 10)).is_accepted());
    }

    #[test]
    fn test_reject_messages() {
        let too_large = RejectReason::TooLarge {
            size: 6_000_000,
            max_bytes: 5_000_000,
        };
        assert_eq!(too_large.to_string(), "File size can't be more than 5MB.");

        let wrong = RejectReason::WrongExtension {
            expected: "osu".to_string(),
        };
        assert_eq!(wrong.to_string(), "Only .osu file is supported.");
    }

    #[test]
    fn test_injected_limits() {
        let validator = Validator::new(UploadConfig {
            max_file_size: 2_500_000,
            allowed_extension: "osz".to_string(),
        });
        assert!(validator.validate(&UploadCandidate::sized("set.osz", 100)).is_accepted());

        match validator.validate(&UploadCandidate::sized("set.osz", 3_000_000)) {
            ValidationVerdict::Rejected(reason) => {
                assert_eq!(reason.to_string(), "File size can't be more than 2.5MB.")
            }
            other => panic!("unexpected verdict {:?}", other),
        }
    }

    #[test]
    fn test_accept_wraps_only_valid_candidates() {
        let validator = Validator::default();
        let accepted = validator
            .accept(UploadCandidate::sized("map.osu", 10))
            .unwrap();
        assert_eq!(accepted.candidate().file_name(), "map.osu");
        assert!(validator.accept(UploadCandidate::sized("map.txt", 10)).is_err());
    }
}
