use crate::domain::team::Team;

pub const FLYING_ACTIVITIES: [&str; 3] = ["snowboarding", "skiing", "onewheeling"];

/// Picks the flying Kody variant for `team`; `seed` is in `[0, 1)`.
pub fn flying_kody_id(team: Team, seed: f64) -> String {
    let len = FLYING_ACTIVITIES.len();
    let idx = ((seed * len as f64).floor().max(0.0) as usize).min(len - 1);
    format!(
        "kos/kody/flying-{}-{}",
        FLYING_ACTIVITIES[idx],
        team.as_str().to_lowercase()
    )
}

pub fn image_url(base_url: &str, id: &str, width: u32) -> String {
    format!("{}/w_{width},q_auto,f_auto/{id}", base_url.trim_end_matches('/'))
}

/// `srcset` value for the given widths.
pub fn srcset(base_url: &str, id: &str, widths: &[u32]) -> String {
    widths
        .iter()
        .map(|w| format!("{} {w}w", image_url(base_url, id, *w)))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_selects_variant() {
        assert_eq!(flying_kody_id(Team::Red, 0.0), "kos/kody/flying-snowboarding-red");
        assert_eq!(flying_kody_id(Team::Blue, 0.5), "kos/kody/flying-skiing-blue");
        assert_eq!(flying_kody_id(Team::Yellow, 0.99), "kos/kody/flying-onewheeling-yellow");
    }

    #[test]
    fn srcset_lists_each_width() {
        assert_eq!(
            srcset("https://img.test/", "a/b", &[100, 200]),
            "https://img.test/w_100,q_auto,f_auto/a/b 100w, https://img.test/w_200,q_auto,f_auto/a/b 200w"
        );
    }
}
