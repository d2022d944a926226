//! Built-in team sheets used by the continuous match runner.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::error::Result;
use crate::models::roster::Roster;

struct TeamSheet {
    name: &'static str,
    players: [&'static str; 11],
    bowlers: [&'static str; 5],
}

const TEAM_SHEETS: [TeamSheet; 4] = [
    TeamSheet {
        name: "India",
        players: [
            "Rohit Sharma",
            "Shikhar Dhawan",
            "Virat Kohli",
            "KL Rahul",
            "Rishabh Pant",
            "Hardik Pandya",
            "Ravindra Jadeja",
            "Jasprit Bumrah",
            "Mohammed Shami",
            "Kuldeep Yadav",
            "Yuzvendra Chahal",
        ],
        bowlers: [
            "Jasprit Bumrah",
            "Mohammed Shami",
            "Kuldeep Yadav",
            "Yuzvendra Chahal",
            "Hardik Pandya",
        ],
    },
    TeamSheet {
        name: "Australia",
        players: [
            "David Warner",
            "Aaron Finch",
            "Steve Smith",
            "Marnus Labuschagne",
            "Glenn Maxwell",
            "Marcus Stoinis",
            "Alex Carey",
            "Mitchell Starc",
            "Pat Cummins",
            "Josh Hazlewood",
            "Adam Zampa",
        ],
        bowlers: ["Mitchell Starc", "Pat Cummins", "Josh Hazlewood", "Adam Zampa", "Glenn Maxwell"],
    },
    TeamSheet {
        name: "England",
        players: [
            "Jos Buttler",
            "Jason Roy",
            "Eoin Morgan",
            "Joe Root",
            "Ben Stokes",
            "Jonny Bairstow",
            "Sam Curran",
            "Jofra Archer",
            "Adil Rashid",
            "Mark Wood",
            "Chris Woakes",
        ],
        bowlers: ["Jofra Archer", "Sam Curran", "Adil Rashid", "Mark Wood", "Chris Woakes"],
    },
    TeamSheet {
        name: "New Zealand",
        players: [
            "Kane Williamson",
            "Ross Taylor",
            "Martin Guptill",
            "Tim Southee",
            "Trent Boult",
            "Mitchell Santner",
            "James Neesham",
            "Lockie Ferguson",
            "Ish Sodhi",
            "Glenn Phillips",
            "Tom Latham",
        ],
        bowlers: ["Tim Southee", "Trent Boult", "Lockie Ferguson", "Mitchell Santner", "Ish Sodhi"],
    },
];

fn build(sheet: &TeamSheet) -> Result<Arc<Roster>> {
    Roster::from_strs(sheet.name, &sheet.players, &sheet.bowlers).map(Arc::new)
}

/// Built once; the sheets above are valid so construction cannot fail.
static DEFAULT_TEAMS: Lazy<Vec<Arc<Roster>>> =
    Lazy::new(|| TEAM_SHEETS.iter().filter_map(|sheet| build(sheet).ok()).collect());

/// India, Australia, England and New Zealand.
pub fn default_teams() -> Vec<Arc<Roster>> {
    DEFAULT_TEAMS.clone()
}

/// Look up a built-in team by name (case-insensitive).
pub fn find_team(name: &str) -> Option<Arc<Roster>> {
    DEFAULT_TEAMS.iter().find(|team| team.name().eq_ignore_ascii_case(name)).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sheets_build() {
        let teams = default_teams();
        assert_eq!(teams.len(), 4);
        for team in &teams {
            assert_eq!(team.players().len(), 11);
            assert_eq!(team.bowlers().len(), 5);
            for bowler in team.bowlers() {
                assert!(team.players().contains(bowler), "{bowler} not in {} XI", team.name());
            }
        }
    }

    #[test]
    fn test_find_team() {
        assert_eq!(find_team("new zealand").map(|t| t.name().to_string()), Some("New Zealand".into()));
        assert!(find_team("Narnia").is_none());
    }

    #[test]
    fn test_teams_are_shared() {
        let a = find_team("India").unwrap();
        let b = find_team("India").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
