use crate::domain::post::TeamRanking;
use crate::domain::team::Team;

/// Team of the first ranking entry.
///
/// Rankings must already be sorted by metric, descending. Producers that cannot
/// guarantee that order should call [`sort_rankings`] first.
pub fn extract_leader(rankings: &[TeamRanking]) -> Option<Team> {
    rankings.first().map(|r| r.team)
}

/// Sorts descending by metric. Stable, so ties keep first-seen order.
pub fn sort_rankings(rankings: &mut [TeamRanking]) {
    rankings.sort_by(|a, b| b.metric.cmp(&a.metric));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rankings_have_no_leader() {
        assert_eq!(extract_leader(&[]), None);
    }

    #[test]
    fn leader_is_first_entry() {
        let rankings = [
            TeamRanking { team: Team::Red, metric: 5 },
            TeamRanking { team: Team::Blue, metric: 3 },
        ];
        assert_eq!(extract_leader(&rankings), Some(Team::Red));
    }

    #[test]
    fn sort_is_descending_and_stable_on_ties() {
        let mut rankings = vec![
            TeamRanking { team: Team::Yellow, metric: 3 },
            TeamRanking { team: Team::Blue, metric: 9 },
            TeamRanking { team: Team::Red, metric: 3 },
        ];
        sort_rankings(&mut rankings);
        let order: Vec<_> = rankings.iter().map(|r| r.team).collect();
        assert_eq!(order, vec![Team::Blue, Team::Yellow, Team::Red]);
        assert_eq!(extract_leader(&rankings), Some(Team::Blue));
    }
}
