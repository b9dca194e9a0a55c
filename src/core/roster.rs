use crate::core::models::poll::PollOption;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionRoster<T> {
    pub option_id: String,
    pub voters: Vec<T>,
}

/// Assigns identities from `pool` to options in proportion to their vote
/// share, for the "view voters" dialog. Each option takes
/// `round(votes / total * pool.len())` identities off the front of what
/// remains; rounding leftovers are dropped. Purely cosmetic sample data.
pub fn distribute_voters<T: Clone>(options: &[PollOption], pool: &[T]) -> Vec<OptionRoster<T>> {
    let total: i64 = options.iter().map(|o| o.votes).sum();
    let mut cursor = 0usize;
    options
        .iter()
        .map(|opt| {
            let want = if total <= 0 || pool.is_empty() {
                0
            } else {
                (opt.votes as f64 / total as f64 * pool.len() as f64).round() as usize
            };
            let take = want.min(pool.len() - cursor);
            let voters = pool[cursor..cursor + take].to_vec();
            cursor += take;
            OptionRoster {
                option_id: opt.id.clone(),
                voters,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::poll::PollOption;

    fn options(counts: &[i64]) -> Vec<PollOption> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &votes)| PollOption::new(format!("opt{}", i + 1), "", votes))
            .collect()
    }

    #[test]
    fn test_empty_pool_yields_empty_rosters() {
        let rosters = distribute_voters::<&str>(&options(&[72, 95, 22]), &[]);
        assert_eq!(rosters.len(), 3);
        assert!(rosters.iter().all(|r| r.voters.is_empty()));
    }

    #[test]
    fn test_zero_votes_assigns_nobody() {
        let pool = ["a", "b", "c"];
        let rosters = distribute_voters(&options(&[0, 0]), &pool);
        assert!(rosters.iter().all(|r| r.voters.is_empty()));
    }

    #[test]
    fn test_proportional_assignment() {
        let pool: Vec<String> = (0..10).map(|i| format!("voter-{}", i)).collect();
        let rosters = distribute_voters(&options(&[6, 4]), &pool);
        assert_eq!(rosters[0].voters.len(), 6);
        assert_eq!(rosters[1].voters.len(), 4);
        // Identities come off the front of the pool in order.
        assert_eq!(rosters[0].voters[0], "voter-0");
        assert_eq!(rosters[1].voters[0], "voter-6");
    }

    #[test]
    fn test_rounding_never_overdraws_pool() {
        let pool = ["a", "b", "c"];
        // Each option wants round(2/4 * 3) = 2, but only one identity remains
        // for the second; it gets clamped instead of panicking.
        let rosters = distribute_voters(&options(&[2, 2]), &pool);
        assert_eq!(rosters[0].voters.len(), 2);
        assert_eq!(rosters[1].voters.len(), 1);
    }
}
