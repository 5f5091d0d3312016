// Recover name, team and position from a cell whose text runs together with
// no delimiter, e.g. "J. SmithKCRB".

/// Position codes in match priority order. `K` comes after the two-letter
/// codes so "RB" in "...KCRB" wins over the `K` of "KC".
pub const POSITIONS: &[&str] = &["QB", "RB", "WR", "TE", "K", "D/ST"];

/// NFL team abbreviations in match priority order.
pub const TEAMS: &[&str] = &[
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC", "LAC", "LAR", "LV", "MIA", "MIN", "NE", "NO", "NYG", "NYJ", "PHI",
    "PIT", "SEA", "SF", "TB", "TEN", "WSH",
];

/// The three fields recovered from a combined player-info string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerInfo {
    pub name: String,
    pub team: String,
    pub position: String,
}

impl PlayerInfo {
    /// The combined form the splitter consumes: name, team, position with no
    /// separators.
    pub fn combined(&self) -> String {
        format!("{}{}{}", self.name, self.team, self.position)
    }
}

/// Splits a combined player-info string. Callers hold this behind the trait
/// so the matching strategy can be replaced without touching them.
pub trait InfoSplitter: Send + Sync {
    fn split(&self, text: &str) -> PlayerInfo;
}

/// First-match substring splitter.
///
/// Each list is scanned in order and the first entry that occurs anywhere in
/// the text wins, regardless of length or location. Names that embed an
/// uppercase position or team code can be misread; that behaviour is kept
/// as-is.
#[derive(Debug, Clone, Copy)]
pub struct FirstMatchSplitter {
    pub positions: &'static [&'static str],
    pub teams: &'static [&'static str],
}

impl Default for FirstMatchSplitter {
    fn default() -> Self {
        FirstMatchSplitter {
            positions: POSITIONS,
            teams: TEAMS,
        }
    }
}

impl InfoSplitter for FirstMatchSplitter {
    fn split(&self, text: &str) -> PlayerInfo {
        let text = text.trim();
        let position = first_match(text, self.positions);
        let team = first_match(text, self.teams);

        // Team goes first: removing a one-letter position such as `K` first
        // could break the team code it sits in.
        let mut rest = text.to_string();
        if let Some(t) = team {
            rest = rest.replacen(t, "", 1);
        }
        if let Some(p) = position {
            rest = rest.replacen(p, "", 1);
        }

        PlayerInfo {
            name: trim_trailing_marker(&rest),
            team: team.unwrap_or_default().to_string(),
            position: position.unwrap_or_default().to_string(),
        }
    }
}

fn first_match<'a>(text: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|c| text.contains(c))
}

/// Injury designations that can trail a name: questionable, out, doubtful,
/// probable.
const INJURY_MARKERS: &[char] = &['Q', 'O', 'D', 'P'];

/// Drop a single uppercase letter stuck to the end of the name: any capital
/// after a lowercase letter ("SmithQ"), or an injury designation after a
/// period ("Jr.Q"). Roman numerals and `D/ST` end in a capital after a
/// capital or a slash and are left alone.
fn trim_trailing_marker(s: &str) -> String {
    let mut out = s.trim().to_string();
    loop {
        let mut chars = out.chars().rev();
        let (Some(last), Some(prev)) = (chars.next(), chars.next()) else {
            break;
        };
        let is_marker = last.is_ascii_uppercase()
            && (prev.is_lowercase() || (prev == '.' && INJURY_MARKERS.contains(&last)));
        if !is_marker {
            break;
        }
        out.pop();
    }
    out.trim().to_string()
}

/// Split with the default first-match splitter.
pub fn split_player_info(text: &str) -> PlayerInfo {
    FirstMatchSplitter::default().split(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_name_team_position() {
        let info = split_player_info("J. SmithKCRB");
        assert_eq!(info.name, "J. Smith");
        assert_eq!(info.team, "KC");
        assert_eq!(info.position, "RB");
    }

    #[test]
    fn kicker_on_kc_keeps_name_intact() {
        let info = split_player_info("Harrison ButkerKCK");
        assert_eq!(info.name, "Harrison Butker");
        assert_eq!(info.team, "KC");
        assert_eq!(info.position, "K");
    }

    #[test]
    fn defense_position() {
        let info = split_player_info("Steelers D/STPITD/ST");
        assert_eq!(info.team, "PIT");
        assert_eq!(info.position, "D/ST");
        assert_eq!(info.name, "Steelers D/ST");
    }

    #[test]
    fn injury_marker_is_trimmed() {
        let info = split_player_info("Puka NacuaQLARWR");
        assert_eq!(info.name, "Puka Nacua");
        assert_eq!(info.team, "LAR");
        assert_eq!(info.position, "WR");
    }

    #[test]
    fn injury_marker_after_suffix_period_is_trimmed() {
        let info = split_player_info("Marvin Harrison Jr.QARIWR");
        assert_eq!(info.name, "Marvin Harrison Jr.");
        assert_eq!(info.team, "ARI");
        assert_eq!(info.position, "WR");

        let info = split_player_info("Michael Pittman Jr.OINDWR");
        assert_eq!(info.name, "Michael Pittman Jr.");
        assert_eq!(info.team, "IND");
    }

    #[test]
    fn other_capital_after_period_is_kept() {
        assert_eq!(split_player_info("Dr.X").name, "Dr.X");
    }

    #[test]
    fn roman_numeral_suffix_survives() {
        let info = split_player_info("Kenneth Walker IIISEARB");
        assert_eq!(info.name, "Kenneth Walker III");
        assert_eq!(info.team, "SEA");
    }

    #[test]
    fn no_codes_leaves_text_as_name() {
        let info = split_player_info("  Somebody  ");
        assert_eq!(info.name, "Somebody");
        assert!(info.team.is_empty());
        assert!(info.position.is_empty());
    }

    #[test]
    fn earlier_list_entry_wins_over_longer_match() {
        // "WR" is scanned before "TE", so the "TE" inside "TEN" never wins.
        let info = split_player_info("Calvin RidleyTENWR");
        assert_eq!(info.position, "WR");
        assert_eq!(info.team, "TEN");

        let info = split_player_info("Rhamondre StevensonNERB");
        assert_eq!(info.team, "NE");
    }

    #[test]
    fn split_is_idempotent_on_recombined_text() {
        for text in [
            "J. SmithKCRB",
            "Josh AllenBUFQB",
            "Travis KelceKCTE",
            "Justin JeffersonMINWR",
            "Harrison ButkerKCK",
        ] {
            let first = split_player_info(text);
            let second = split_player_info(&first.combined());
            assert_eq!(first, second, "re-split of {text:?} changed");
        }
    }

    /// Known misread: the first `K` in the text belongs to the first name,
    /// so it is removed there and the trailing position `K` is trimmed as a
    /// marker. Kept deliberately; a smarter matcher would change this.
    #[test]
    fn regression_first_match_misreads_embedded_position() {
        let info = split_player_info("Ka'imi FairbairnHOUK");
        assert_eq!(info.team, "HOU");
        assert_eq!(info.position, "K");
        assert_eq!(info.name, "a'imi Fairbairn");
    }

    #[test]
    fn custom_lists_can_be_swapped_in() {
        let splitter = FirstMatchSplitter {
            positions: &["WR"],
            teams: &["XYZ"],
        };
        let info = splitter.split("Test PlayerXYZWR");
        assert_eq!(info.name, "Test Player");
        assert_eq!(info.team, "XYZ");
    }
}
