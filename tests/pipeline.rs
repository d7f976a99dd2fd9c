use std::collections::HashMap;
use std::fs;
use std::path::Path;

use roster_ratings::{
    Config, MissingLegacyPolicy, PageFetcher, Pipeline, RatingsError, Result, OUTPUT_COLUMNS,
};
use tempfile::TempDir;

const PROFILE: &str = include_str!("fixtures/profile.html");

const LAKERS_LEGACY: &str = "\
name,position,playerType,rotationType,rating,isMrClutch,enName
詹姆斯,SF,Star,Starter,97,1,lebron-james
浓眉,PF,Star,Starter,94,0,anthony-davis
";

/// Serves profile pages from memory; unknown identifiers answer 404.
struct StubFetcher {
    pages: HashMap<String, String>,
}

impl StubFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(id, body)| (id.to_string(), body.to_string()))
                .collect(),
        }
    }
}

impl PageFetcher for StubFetcher {
    async fn fetch_profile(&self, identifier: &str) -> Result<String> {
        self.pages
            .get(identifier)
            .cloned()
            .ok_or_else(|| RatingsError::UnexpectedStatus {
                url: format!("https://ratings.test/{identifier}"),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}

fn workspace() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        roster_dir: dir.path().join("player-names"),
        legacy_dir: dir.path().join("roster"),
        output_dir: dir.path().join("out"),
        teams: vec!["lakers".to_string()],
        ..Config::default()
    };
    fs::create_dir_all(&config.roster_dir).unwrap();
    fs::create_dir_all(&config.legacy_dir).unwrap();
    (dir, config)
}

fn write_team(config: &Config, slug: &str, display_name: &str, roster: &str, legacy: &str) {
    fs::write(config.roster_dir.join(format!("{slug}.txt")), roster).unwrap();
    fs::write(config.legacy_dir.join(format!("{display_name}.csv")), legacy).unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_single_player_end_to_end() {
    let (_dir, config) = workspace();
    write_team(&config, "lakers", "湖人", "lebron-james\n", LAKERS_LEGACY);
    let output = config.output_dir.join("湖人.csv");

    let pipeline = Pipeline::new(StubFetcher::new(&[("lebron-james", PROFILE)]), config);
    let summary = pipeline.run().await;

    assert!(summary.is_success(), "{summary}");
    assert_eq!(summary.rows_written(), 1);

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("name,position,playerType,rotationType,rating,"));
    for line in &lines {
        assert_eq!(line.split(',').count(), OUTPUT_COLUMNS);
    }
    assert_eq!(
        lines[1],
        "詹姆斯,SF,Star,Starter,97,94,83,74,73,72,78,44,70,92,60,55,96,68,95,88,97,99,96,89,1,lebron-james"
    );
}

#[tokio::test]
async fn test_rerun_does_not_duplicate_rows() {
    let (_dir, config) = workspace();
    write_team(&config, "lakers", "湖人", "lebron-james\n", LAKERS_LEGACY);
    let output = config.output_dir.join("湖人.csv");

    let pipeline = Pipeline::new(StubFetcher::new(&[("lebron-james", PROFILE)]), config);
    pipeline.run().await;
    pipeline.run().await;

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines.iter().filter(|l| l.starts_with("name,")).count(), 1);
}

#[tokio::test]
async fn test_failed_player_does_not_stop_the_team() {
    let (_dir, config) = workspace();
    write_team(
        &config,
        "lakers",
        "湖人",
        "lebron-james\nbroken-page\nretired-guy\nanthony-davis",
        LAKERS_LEGACY,
    );
    let output = config.output_dir.join("湖人.csv");

    let broken = PROFILE.replace(
        r#"<li><span class="attribute-box">70</span> Defensive Rebound</li>"#,
        "",
    );
    let fetcher = StubFetcher::new(&[
        ("lebron-james", PROFILE),
        ("broken-page", broken.as_str()),
        ("anthony-davis", PROFILE),
    ]);
    let summary = Pipeline::new(fetcher, config).run().await;

    assert!(!summary.is_success());
    assert_eq!(summary.rows_written(), 2);
    let failures = &summary.teams[0].failures;
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].identifier, "broken-page");
    assert!(failures[0].error.contains("rebounding card"));
    assert_eq!(failures[1].identifier, "retired-guy");
    assert!(failures[1].error.contains("404"));

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(",lebron-james"));
    assert!(lines[2].starts_with("浓眉,PF,"));
    assert!(lines[2].ends_with(",0,anthony-davis"));
}

#[tokio::test]
async fn test_missing_legacy_record_policies() {
    let (_dir, mut config) = workspace();
    write_team(&config, "lakers", "湖人", "austin-reaves\n", LAKERS_LEGACY);
    let output = config.output_dir.join("湖人.csv");
    let fetcher = || StubFetcher::new(&[("austin-reaves", PROFILE)]);

    let summary = Pipeline::new(fetcher(), config.clone()).run().await;
    assert_eq!(summary.rows_written(), 0);
    assert!(summary.teams[0].failures[0]
        .error
        .contains("no legacy record for player austin-reaves"));
    assert_eq!(read_lines(&output).len(), 1);

    config.on_missing_legacy = MissingLegacyPolicy::Placeholder;
    let summary = Pipeline::new(fetcher(), config).run().await;
    assert!(summary.is_success());
    let lines = read_lines(&output);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with(",,,,97,"));
    assert!(lines[1].ends_with(",,austin-reaves"));
}

#[tokio::test]
async fn test_team_failures_are_isolated() {
    let (_dir, mut config) = workspace();
    config.teams = vec![
        "lakers".to_string(),
        "expansion".to_string(),
        "celtics".to_string(),
        "bulls".to_string(),
    ];
    // lakers: roster only, no legacy file
    fs::write(config.roster_dir.join("lakers.txt"), "lebron-james\n").unwrap();
    // bulls: legacy file present but empty
    write_team(&config, "bulls", "公牛", "zach-lavine\n", "");
    write_team(
        &config,
        "celtics",
        "凯尔特人",
        "jayson-tatum\n",
        "塔图姆,SF,Star,Starter,1,jayson-tatum\n",
    );

    let fetcher = StubFetcher::new(&[("jayson-tatum", PROFILE), ("lebron-james", PROFILE)]);
    let summary = Pipeline::new(fetcher, config.clone()).run().await;

    assert_eq!(summary.teams.len(), 1);
    assert_eq!(summary.teams[0].team.slug, "celtics");
    assert_eq!(summary.teams[0].rows_written, 1);

    let failed: Vec<&str> = summary.failed_teams.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(failed, ["lakers", "expansion", "bulls"]);
    assert!(summary.failed_teams[1].error.contains("unknown team"));
    assert!(summary.failed_teams[2].error.contains("empty"));

    assert!(!config.output_dir.join("湖人.csv").exists());
    assert!(!config.output_dir.join("公牛.csv").exists());
}

#[tokio::test]
async fn test_gbk_team_files() {
    let (_dir, mut config) = workspace();
    config.file_charset = "gbk".to_string();
    let (legacy, _, _) = encoding_rs::GBK.encode(LAKERS_LEGACY);
    fs::write(config.roster_dir.join("lakers.txt"), "lebron-james\n").unwrap();
    fs::write(config.legacy_dir.join("湖人.csv"), &legacy).unwrap();
    let output = config.output_dir.join("湖人.csv");

    let summary = Pipeline::new(StubFetcher::new(&[("lebron-james", PROFILE)]), config.clone())
        .run()
        .await;
    assert!(summary.is_success(), "{summary}");
    assert!(read_lines(&output)[1].starts_with("詹姆斯,SF,"));

    config.file_charset = "utf-8".to_string();
    let summary = Pipeline::new(StubFetcher::new(&[("lebron-james", PROFILE)]), config)
        .run()
        .await;
    assert!(summary.failed_teams[0].error.contains("not valid UTF-8"));
}

#[tokio::test]
async fn test_summary_json() {
    let (dir, config) = workspace();
    write_team(&config, "lakers", "湖人", "lebron-james\nretired-guy\n", LAKERS_LEGACY);

    let summary = Pipeline::new(StubFetcher::new(&[("lebron-james", PROFILE)]), config)
        .run()
        .await;
    let path = dir.path().join("reports").join("summary.json");
    summary.write_json(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let team = &json["teams"][0];
    assert_eq!(team["team"]["slug"], "lakers");
    assert_eq!(team["team"]["display_name"], "湖人");
    assert_eq!(team["rows_written"], 1);
    assert_eq!(team["failures"][0]["identifier"], "retired-guy");
    assert_eq!(json["failed_teams"].as_array().unwrap().len(), 0);
    assert!(json["started_at"].is_string());
}
