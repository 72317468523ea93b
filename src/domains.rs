//! Re-anchoring of parent protein domains onto the fusion protein.
//!
//! Domains of the 5' parent keep their coordinates, losing whatever lies past
//! the junction. Domains of the 3' parent are shifted from the 3' protein's
//! coordinates into the fusion protein's, losing whatever lies before the
//! junction.

use log::warn;

use crate::provider::{DomainAnnotation, DomainProvider};
use crate::types::DomainRecord;

/// Project 5' parent domains onto the fusion protein.
///
/// `junction` is the number of 5' residues retained. A domain straddling the
/// junction survives, truncated at the junction, only when at least
/// `min_length` of its residues are retained.
pub fn project_5prime(
    domains: &[DomainRecord],
    junction: i64,
    min_length: i64,
) -> Vec<DomainRecord> {
    let mut projected = Vec::with_capacity(domains.len());

    for domain in domains {
        if domain.start > junction {
            continue;
        }
        if domain.end <= junction {
            projected.push(domain.clone());
        } else if junction - domain.start >= min_length {
            let mut truncated = domain.clone();
            truncated.end = junction;
            projected.push(truncated);
        }
    }

    projected
}

/// Project 3' parent domains onto the fusion protein.
///
/// `junction_3prime` residues of the 3' protein precede the junction and are
/// lost; the remainder follows the `junction_5prime` retained 5' residues.
/// Straddling domains are clipped to start at the junction, whatever length
/// remains.
pub fn project_3prime(
    domains: &[DomainRecord],
    junction_5prime: i64,
    junction_3prime: i64,
) -> Vec<DomainRecord> {
    let shift = junction_5prime - junction_3prime;
    let mut projected = Vec::with_capacity(domains.len());

    for domain in domains {
        if domain.end < junction_3prime {
            continue;
        }
        let mut moved = domain.clone();
        moved.start = if domain.start >= junction_3prime {
            domain.start + shift
        } else {
            junction_5prime
        };
        moved.end = domain.end + shift;
        debug_assert!(moved.end >= moved.start);
        projected.push(moved);
    }

    projected
}

/// Fetch one track's domains for a transcript and resolve their labels.
///
/// Annotations without an accession are skipped. An accession the provider
/// cannot name keeps the accession as its label.
pub fn load_domains<P: DomainProvider + ?Sized>(
    provider: &P,
    transcript_id: &str,
    track: &str,
) -> Vec<DomainRecord> {
    provider
        .domains_for_transcript(transcript_id, track)
        .into_iter()
        .filter(|d| !d.accession.is_empty())
        .map(|DomainAnnotation { accession, start, end }| {
            let label = match provider.resolve_domain_label(&accession) {
                Some(name) => name,
                None => {
                    warn!("No {} name for {}", track, accession);
                    accession.clone()
                }
            };
            DomainRecord::new(accession, label, start, end)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(label: &str, start: i64, end: i64) -> DomainRecord {
        DomainRecord::new(label.to_string(), label.to_string(), start, end)
    }

    #[test]
    fn test_5prime_keep_drop_truncate() {
        let domains = vec![
            domain("before", 10, 40),
            domain("at_junction", 20, 50),
            domain("straddle", 30, 80),
            domain("past", 51, 90),
        ];
        let projected = project_5prime(&domains, 50, 5);

        let labels: Vec<&str> = projected.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["before", "at_junction", "straddle"]);
        assert_eq!(projected[2].start, 30);
        assert_eq!(projected[2].end, 50);
    }

    #[test]
    fn test_5prime_min_length_threshold() {
        // Junction at 50: start 46 retains 4 residues, start 45 retains 5
        let short = project_5prime(&[domain("d", 46, 70)], 50, 5);
        assert!(short.is_empty());

        let kept = project_5prime(&[domain("d", 45, 70)], 50, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].end, 50);
    }

    #[test]
    fn test_3prime_shift_and_clip() {
        let domains = vec![
            domain("before", 10, 29),
            domain("straddle", 20, 60),
            domain("after", 40, 70),
        ];
        let projected = project_3prime(&domains, 100, 30);

        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].label, "straddle");
        assert_eq!((projected[0].start, projected[0].end), (100, 130));
        assert_eq!((projected[1].start, projected[1].end), (110, 140));
    }

    #[test]
    fn test_3prime_domain_ending_at_junction_kept() {
        let projected = project_3prime(&[domain("edge", 10, 30)], 100, 30);
        assert_eq!(projected.len(), 1);
        assert_eq!((projected[0].start, projected[0].end), (100, 100));
    }

    #[test]
    fn test_3prime_null_shift_is_identity() {
        let domains = vec![domain("a", 0, 10), domain("b", 15, 40)];
        assert_eq!(project_3prime(&domains, 0, 0), domains);
    }

    #[test]
    fn test_3prime_has_no_min_length() {
        // One retained residue on the 3' side still survives, unlike the 5' side
        let projected = project_3prime(&[domain("tiny", 10, 30)], 100, 30);
        assert_eq!(projected.len(), 1);
        let dropped = project_5prime(&[domain("tiny", 49, 80)], 50, 5);
        assert!(dropped.is_empty());
    }
}
