use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use saju_base::{BirthInput, Branch, Pillar, Stem, build_chart};
use saju_fortune::{
    Category, Combo, EventLevel, Grade, NatalContext, PeriodLevel, PeriodText, PhraseBook,
    Reading, ReadingConfig, build_decades, build_months, build_reading, build_years, combo_key,
    event_key, period_seed, render_reading, score_key, score_two_stage,
};

#[derive(Parser)]
#[command(name = "saju", about = "Four Pillars charts, luck periods and readings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Birth moment at the fixed +09:00 offset.
#[derive(Args, Debug, Clone)]
struct BirthArgs {
    /// Local date (YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// Local time (HH:MM)
    #[arg(long, default_value = "12:00")]
    time: String,
    /// Sex: M or F
    #[arg(long, default_value = "M")]
    sex: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Four pillars, element vectors and strength
    Chart {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Score one pillar against the natal chart
    Score {
        #[command(flatten)]
        birth: BirthArgs,
        /// Pillar as two Hanja (e.g. 甲子) or a cycle index 0-59
        #[arg(long)]
        pillar: String,
        /// Path to a JSON reading config
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Decade and year timelines, optionally with months for one year
    Timeline {
        #[command(flatten)]
        birth: BirthArgs,
        /// Also build the month timeline for this calendar year
        #[arg(long)]
        months: Option<i32>,
        /// Path to a JSON reading config
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Full reading with lifetime summaries
    Reading {
        #[command(flatten)]
        birth: BirthArgs,
        /// Path to a JSON reading config
        #[arg(long)]
        config: Option<PathBuf>,
        /// Phrase book; adds picked text for every period
        #[arg(long)]
        book: Option<PathBuf>,
        /// Reader name used in the period seeds
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Pick a phrase from a JSON phrase book by seed
    Pick {
        /// Path to the phrase book
        #[arg(long)]
        book: PathBuf,
        /// Raw pool key (e.g. score.love.A); overrides the key flags below
        #[arg(long)]
        key: Option<String>,
        #[command(flatten)]
        pool: PoolArgs,
        /// Raw seed string; overrides the name/level/label/category seed
        #[arg(long)]
        seed: Option<String>,
        /// Reader name used in the period seed
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, value_enum, default_value = "year")]
        level: LevelArg,
        /// Period label (e.g. 2024)
        #[arg(long, default_value = "")]
        label: String,
        #[arg(long, value_enum, default_value = "love")]
        category: CategoryArg,
    },
}

/// Which pool of a period category to pick from.
#[derive(Args, Debug, Clone)]
struct PoolArgs {
    /// Grade band pool (score.<category>.<grade>)
    #[arg(long, value_enum, conflicts_with_all = ["event", "combo"])]
    grade: Option<GradeArg>,
    /// Event pool side (event.<side>.<level>.<category>)
    #[arg(long, value_enum, conflicts_with = "combo")]
    event: Option<SideArg>,
    /// Combo pool (combo.<combo>)
    #[arg(long, value_enum)]
    combo: Option<ComboArg>,
    /// Intensity used with --event
    #[arg(long, value_enum, default_value = "light")]
    event_level: EventLevelArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GradeArg {
    S,
    A,
    B,
    C,
    D,
    E,
}

impl From<GradeArg> for Grade {
    fn from(g: GradeArg) -> Self {
        match g {
            GradeArg::S => Self::S,
            GradeArg::A => Self::A,
            GradeArg::B => Self::B,
            GradeArg::C => Self::C,
            GradeArg::D => Self::D,
            GradeArg::E => Self::E,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    Pos,
    Neg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EventLevelArg {
    Light,
    Medium,
    Strong,
}

impl From<EventLevelArg> for EventLevel {
    fn from(l: EventLevelArg) -> Self {
        match l {
            EventLevelArg::Light => Self::Light,
            EventLevelArg::Medium => Self::Medium,
            EventLevelArg::Strong => Self::Strong,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ComboArg {
    Crash,
    Breakthrough,
    MoneyLeak,
    LoveConflict,
    HealthStress,
    LoveBoost,
    Teamwork,
    ChangeChance,
}

impl From<ComboArg> for Combo {
    fn from(c: ComboArg) -> Self {
        match c {
            ComboArg::Crash => Self::Crash,
            ComboArg::Breakthrough => Self::Breakthrough,
            ComboArg::MoneyLeak => Self::MoneyLeak,
            ComboArg::LoveConflict => Self::LoveConflict,
            ComboArg::HealthStress => Self::HealthStress,
            ComboArg::LoveBoost => Self::LoveBoost,
            ComboArg::Teamwork => Self::Teamwork,
            ComboArg::ChangeChance => Self::ChangeChance,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LevelArg {
    Decade,
    Year,
    Month,
}

impl From<LevelArg> for PeriodLevel {
    fn from(l: LevelArg) -> Self {
        match l {
            LevelArg::Decade => Self::Decade,
            LevelArg::Year => Self::Year,
            LevelArg::Month => Self::Month,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    Love,
    Money,
    Career,
    Health,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Love => Self::Love,
            CategoryArg::Money => Self::Money,
            CategoryArg::Career => Self::Career,
            CategoryArg::Health => Self::Health,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{text}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ReadingConfig> {
    let Some(path) = path else {
        return Ok(ReadingConfig::default());
    };
    let cfg = ReadingConfig::from_path(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    cfg.validate().context("validating config")?;
    debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

fn load_book(path: &Path) -> Result<PhraseBook> {
    let book = PhraseBook::from_path(path)
        .with_context(|| format!("loading phrase book {}", path.display()))?;
    debug!(path = %path.display(), pools = book.len(), "phrase book loaded");
    Ok(book)
}

fn parse_birth(b: &BirthArgs) -> Result<BirthInput> {
    BirthInput::parse(&b.date, &b.time, &b.sex)
        .with_context(|| format!("birth {} {} {}", b.date, b.time, b.sex))
}

/// Pool key and seed for one pick, suffixed the way period text is rendered.
fn pool_key(pool: &PoolArgs, category: Category, base: String) -> Result<(String, String)> {
    if let Some(g) = pool.grade {
        return Ok((score_key(category, g.into()), base));
    }
    if let Some(side) = pool.event {
        let positive = matches!(side, SideArg::Pos);
        let suffix = if positive { "pos" } else { "neg" };
        let key = event_key(positive, pool.event_level.into(), category);
        return Ok((key, format!("{base}|{suffix}")));
    }
    if let Some(c) = pool.combo {
        let key = combo_key(c.into());
        let seed = format!("{base}|combo|{key}");
        return Ok((key, seed));
    }
    bail!("one of --key, --grade, --event or --combo is required")
}

/// Two Hanja (`甲子`) or a cycle index.
fn parse_pillar(s: &str) -> Result<Pillar> {
    let s = s.trim();
    if let Ok(i) = s.parse::<u8>() {
        if i >= 60 {
            bail!("pillar index {i} out of range 0-59");
        }
        return Ok(Pillar::from_index(i));
    }
    let mut chars = s.chars();
    let (Some(st), Some(br), None) = (chars.next(), chars.next(), chars.next()) else {
        bail!("pillar '{s}' must be two Hanja or an index");
    };
    let stem: Stem = st.to_string().parse()?;
    let branch: Branch = br.to_string().parse()?;
    Ok(Pillar::new(stem, branch)?)
}

#[derive(Serialize)]
struct ChartOutput {
    chart: saju_base::Chart,
    is_approximate: bool,
    surface: saju_base::ElementVector,
    hidden: saju_base::ElementVector,
    strength: saju_base::Strength,
}

#[derive(Serialize)]
struct ScoreOutput {
    pillar: Pillar,
    career_clash_mode: saju_fortune::CareerClashMode,
    total: u8,
    grade: saju_fortune::Grade,
    score: saju_fortune::PeriodScore,
}

#[derive(Serialize)]
struct TimelineOutput {
    decades: saju_fortune::DecadeTimeline,
    years: Vec<saju_fortune::YearPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    months: Option<saju_fortune::MonthTimeline>,
}

#[derive(Serialize)]
struct ReadingOutput {
    #[serde(flatten)]
    reading: Reading,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<Vec<PeriodText>>,
}

#[derive(Serialize)]
struct PickOutput<'a> {
    key: &'a str,
    seed: &'a str,
    phrase: Option<&'a str>,
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Chart { birth } => {
            let birth = parse_birth(&birth)?;
            let result = build_chart(&birth.instant)?;
            let natal = NatalContext::new(&result.chart);
            print_json(&ChartOutput {
                chart: result.chart,
                is_approximate: result.is_approximate,
                surface: natal.surface,
                hidden: natal.hidden,
                strength: natal.strength,
            })
        }

        Commands::Score {
            birth,
            pillar,
            config,
        } => {
            let birth = parse_birth(&birth)?;
            let pillar = parse_pillar(&pillar)?;
            let cfg = load_config(config.as_deref())?;
            let chart = build_chart(&birth.instant)?.chart;
            let natal = NatalContext::new(&chart);
            let (score, mode) = score_two_stage(&natal, pillar, &cfg.scoring);
            let total = score.categories.total();
            print_json(&ScoreOutput {
                pillar,
                career_clash_mode: mode,
                total,
                grade: saju_fortune::grade(total),
                score,
            })
        }

        Commands::Timeline {
            birth,
            months,
            config,
        } => {
            let birth = parse_birth(&birth)?;
            let cfg = load_config(config.as_deref())?;
            let chart = build_chart(&birth.instant)?.chart;
            let natal = NatalContext::new(&chart);
            let decades = build_decades(&natal, &birth, &cfg);
            let years = build_years(&natal, &decades.decades, &birth, &cfg);
            let months = match months {
                None => None,
                Some(target) => {
                    let pos = years
                        .iter()
                        .position(|y| y.year() == target)
                        .ok_or_else(|| anyhow!("year {target} is outside the timeline"))?;
                    let year = &years[pos];
                    let prev = pos.checked_sub(1).and_then(|p| years.get(p));
                    let decade = &decades.decades[year.decade_index];
                    Some(build_months(&natal, year, prev, decade, &cfg))
                }
            };
            print_json(&TimelineOutput {
                decades,
                years,
                months,
            })
        }

        Commands::Reading {
            birth,
            config,
            book,
            name,
        } => {
            let birth = parse_birth(&birth)?;
            let cfg = load_config(config.as_deref())?;
            let reading = build_reading(&birth, &cfg).context("building reading")?;
            let text = match book {
                Some(path) => Some(render_reading(&load_book(&path)?, &name, &reading)),
                None => None,
            };
            print_json(&ReadingOutput { reading, text })
        }

        Commands::Pick {
            book,
            key,
            pool,
            seed,
            name,
            level,
            label,
            category,
        } => {
            let phrases = load_book(&book)?;
            let base = period_seed(&name, level.into(), &label, category.into());
            let (key, derived_seed) = match key {
                Some(key) => (key, base),
                None => pool_key(&pool, category.into(), base)?,
            };
            let seed = seed.unwrap_or(derived_seed);
            print_json(&PickOutput {
                key: &key,
                seed: &seed,
                phrase: phrases.pick(&key, &seed),
            })
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pillar_from_hanja_and_index() {
        assert_eq!(parse_pillar("甲子").unwrap().index(), 0);
        assert_eq!(parse_pillar("癸亥").unwrap().index(), 59);
        assert_eq!(parse_pillar(" 40 ").unwrap().to_string(), "甲辰");
    }

    #[test]
    fn bad_pillars_rejected() {
        assert!(parse_pillar("60").is_err());
        assert!(parse_pillar("甲丑").is_err(), "mixed parity");
        assert!(parse_pillar("甲").is_err());
        assert!(parse_pillar("甲子丑").is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "saju", "score", "--date", "2024-02-04", "--time", "10:00", "--pillar", "甲子",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Score { .. }));

        let cli = Cli::try_parse_from([
            "saju", "pick", "--book", "b.json", "--key", "score.love.A", "--name", "홍길동",
            "--label", "2024",
        ])
        .unwrap();
        let Commands::Pick { level, category, .. } = cli.command else {
            panic!("expected pick");
        };
        assert!(matches!(level, LevelArg::Year));
        assert!(matches!(category, CategoryArg::Love));
    }

    fn pool(args: &[&str]) -> PoolArgs {
        let mut argv = vec!["saju", "pick", "--book", "b.json"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Pick { pool, .. } => pool,
            _ => panic!("expected pick"),
        }
    }

    #[test]
    fn pool_keys_follow_period_text() {
        let base = || "홍길동|year|2024|love".to_owned();
        let (key, seed) = pool_key(&pool(&["--grade", "a"]), Category::Love, base()).unwrap();
        assert_eq!((key.as_str(), seed.as_str()), ("score.love.A", "홍길동|year|2024|love"));

        let p = pool(&["--event", "neg", "--event-level", "medium"]);
        let (key, seed) = pool_key(&p, Category::Health, base()).unwrap();
        assert_eq!(key, "event.neg.medium.health");
        assert!(seed.ends_with("|neg"));

        let p = pool(&["--combo", "money-leak"]);
        let (key, seed) = pool_key(&p, Category::Love, base()).unwrap();
        assert_eq!(key, "combo.money_leak");
        assert_eq!(seed, "홍길동|year|2024|love|combo|combo.money_leak");

        assert!(pool_key(&pool(&[]), Category::Love, base()).is_err());
    }

    #[test]
    fn pool_flags_are_exclusive() {
        let r = Cli::try_parse_from([
            "saju", "pick", "--book", "b.json", "--grade", "a", "--combo", "crash",
        ]);
        assert!(r.is_err());
    }

    #[test]
    fn reading_accepts_a_book() {
        let cli = Cli::try_parse_from([
            "saju", "reading", "--date", "2024-02-04", "--book", "b.json", "--name", "홍길동",
        ])
        .unwrap();
        let Commands::Reading { book, name, .. } = cli.command else {
            panic!("expected reading");
        };
        assert_eq!(book, Some(PathBuf::from("b.json")));
        assert_eq!(name, "홍길동");
    }

    #[test]
    fn missing_date_is_an_error() {
        assert!(Cli::try_parse_from(["saju", "chart"]).is_err());
    }

    #[test]
    fn default_config_without_path() {
        assert_eq!(load_config(None).unwrap(), ReadingConfig::default());
    }
}
