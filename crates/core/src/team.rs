use crate::domain::team::Team;
use crate::error::TeamError;

/// Returns `explicit` when set, otherwise `fallback_pool[floor(rng() * len)]`.
///
/// `rng` must yield values in `[0, 1)`; out-of-range values are clamped to the
/// last element rather than panicking.
pub fn resolve_team(
    explicit: Option<Team>,
    fallback_pool: &[Team],
    rng: &mut impl FnMut() -> f64,
) -> Result<Team, TeamError> {
    if let Some(team) = explicit {
        return Ok(team);
    }
    if fallback_pool.is_empty() {
        return Err(TeamError::InvalidInput("fallback team pool is empty"));
    }

    let len = fallback_pool.len();
    let idx = ((rng() * len as f64).floor().max(0.0) as usize).min(len - 1);
    Ok(fallback_pool[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    const POOL: [Team; 3] = [Team::Red, Team::Yellow, Team::Blue];

    #[test]
    fn explicit_team_wins_regardless_of_rng() {
        let mut rng = || -> f64 { panic!("rng must not be consulted") };
        assert_eq!(resolve_team(Some(Team::Yellow), &POOL, &mut rng), Ok(Team::Yellow));
        assert_eq!(resolve_team(Some(Team::Blue), &[], &mut rng), Ok(Team::Blue));
    }

    #[test]
    fn fallback_indexes_by_floor() {
        assert_eq!(resolve_team(None, &POOL, &mut || 0.0), Ok(Team::Red));
        assert_eq!(resolve_team(None, &POOL, &mut || 0.34), Ok(Team::Yellow));
        assert_eq!(resolve_team(None, &POOL, &mut || 0.999), Ok(Team::Blue));
    }

    #[test]
    fn empty_pool_is_invalid_input() {
        let res = resolve_team(None, &[], &mut || 0.5);
        assert!(matches!(res, Err(TeamError::InvalidInput(_))));
    }
}
