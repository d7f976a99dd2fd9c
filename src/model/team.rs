use serde::{Deserialize, Serialize};

/// Slugs processed when no team list is configured.
pub const CURRENT_TEAMS: [&str; 30] = [
    "76ers",
    "bulls",
    "celtics",
    "kings",
    "suns",
    "warriors",
    "wizards",
    "knicks",
    "trail-blazers",
    "clippers",
    "nuggets",
    "timberwolves",
    "pacers",
    "pistons",
    "lakers",
    "rockets",
    "grizzlies",
    "heat",
    "jazz",
    "mavericks",
    "raptors",
    "nets",
    "hawks",
    "bucks",
    "thunder",
    "spurs",
    "cavaliers",
    "magic",
    "pelicans",
    "hornets",
];

const BUILTIN_TEAMS: [(&str, &str); 36] = [
    ("76ers", "76人"),
    ("bulls", "公牛"),
    ("celtics", "凯尔特人"),
    ("kings", "国王"),
    ("suns", "太阳"),
    ("warriors", "勇士"),
    ("wizards", "奇才"),
    ("knicks", "尼克斯"),
    ("trail-blazers", "开拓者"),
    ("clippers", "快船"),
    ("nuggets", "掘金"),
    ("timberwolves", "森林狼"),
    ("pacers", "步行者"),
    ("pistons", "活塞"),
    ("lakers", "湖人"),
    ("rockets", "火箭"),
    ("grizzlies", "灰熊"),
    ("heat", "热火"),
    ("jazz", "爵士"),
    ("mavericks", "独行侠"),
    ("raptors", "猛龙"),
    ("nets", "篮网"),
    ("hawks", "老鹰"),
    ("bucks", "雄鹿"),
    ("thunder", "雷霆"),
    ("spurs", "马刺"),
    ("cavaliers", "骑士"),
    ("magic", "魔术"),
    ("pelicans", "鹈鹕"),
    ("hornets", "黄蜂"),
    ("1011-mavericks", "1011小牛"),
    ("9596-bulls", "9596公牛"),
    ("0708-celtics", "0708凯尔特人"),
    ("1314-spurs", "1314马刺"),
    ("0001-lakers", "0001湖人"),
    ("1617-warriors", "1617勇士"),
];

/// A team as known to the ratings site (`slug`) and to the local roster files
/// (`display_name`, used as the CSV file stem).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub slug: String,
    pub display_name: String,
}

impl Team {
    pub fn new(slug: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            display_name: display_name.into(),
        }
    }
}

/// Lookup table from team slug to display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCatalog {
    teams: Vec<Team>,
}

impl TeamCatalog {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Add or replace entries. A team whose slug is already present takes the new display name.
    pub fn extend(&mut self, teams: impl IntoIterator<Item = Team>) {
        for team in teams {
            match self.teams.iter_mut().find(|t| t.slug == team.slug) {
                Some(existing) => existing.display_name = team.display_name,
                None => self.teams.push(team),
            }
        }
    }

    pub fn get(&self, slug: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.slug == slug)
    }
}

impl Default for TeamCatalog {
    fn default() -> Self {
        Self::new(
            BUILTIN_TEAMS
                .iter()
                .map(|(slug, name)| Team::new(*slug, *name))
                .collect(),
        )
    }
}
