use anyhow::{Context, Result};
use itemdex_core::{CardView, Catalog, FilterOptions, Query, ALL_LABEL};
use itemdex_cui::{LaunchOptions, UiLocale, LANG_ENV};
use itemdex_data::{load_catalog, load_failure_message, LoadOptions, DEFAULT_CONFIG_PATH};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ListArgs {
    query: Query,
    sort: String,
    format: OutputFormat,
    limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Browse,
    List(ListArgs),
    Options(OutputFormat),
    Config,
    Help,
    Version,
}

#[derive(Debug, Clone)]
struct CliOptions {
    locale: UiLocale,
    config_path: PathBuf,
    db_path: Option<PathBuf>,
    command: Command,
}

impl CliOptions {
    fn load_options(&self) -> LoadOptions {
        let options = LoadOptions::new(self.config_path.clone());
        match self.db_path.as_ref() {
            Some(path) => options.with_db_path(path.clone()),
            None => options,
        }
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    summary: String,
    total: usize,
    matched: usize,
    sort: &'a str,
    items: Vec<CardView>,
}

fn take_value<'a>(args: &'a [String], idx: &mut usize, flag: &str) -> Result<&'a str, String> {
    *idx += 1;
    args.get(*idx)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut locale_arg: Option<String> = std::env::var(LANG_ENV).ok();
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut db_path = None;
    let mut command_name: Option<String> = None;
    let mut list = ListArgs::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let arg = args[idx].as_str();
        match arg {
            "--lang" | "-l" => locale_arg = Some(take_value(args, &mut idx, arg)?.to_string()),
            "--config" | "-c" => config_path = PathBuf::from(take_value(args, &mut idx, arg)?),
            "--db" => db_path = Some(PathBuf::from(take_value(args, &mut idx, arg)?)),
            "--keyword" | "-k" => list.query.keyword = take_value(args, &mut idx, arg)?.to_string(),
            "--hero" => list.query.hero = Some(take_value(args, &mut idx, arg)?.to_string()),
            "--size" => list.query.size = Some(take_value(args, &mut idx, arg)?.to_string()),
            "--tier" => list.query.tier = Some(take_value(args, &mut idx, arg)?.to_string()),
            "--tag" | "-t" => {
                list.query
                    .tags
                    .insert(take_value(args, &mut idx, arg)?.to_string());
            }
            "--sort" | "-s" => list.sort = take_value(args, &mut idx, arg)?.to_string(),
            "--format" | "-f" => list.format = OutputFormat::parse(take_value(args, &mut idx, arg)?)?,
            "--limit" | "-n" => {
                let value = take_value(args, &mut idx, arg)?;
                let limit = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid limit: {value}"))?;
                list.limit = Some(limit);
            }
            "--help" | "-h" => command_name = Some("help".to_string()),
            "--version" | "-V" => command_name = Some("version".to_string()),
            other if other.starts_with('-') => return Err(format!("unknown option: {other}")),
            other => {
                if command_name.is_some() {
                    return Err(format!("unexpected argument: {other}"));
                }
                command_name = Some(other.to_string());
            }
        }
        idx += 1;
    }
    let command = match command_name.as_deref() {
        None => Command::Browse,
        Some("list" | "ls") => Command::List(list),
        Some("options" | "opts") => Command::Options(list.format),
        Some("config") => Command::Config,
        Some("help") => Command::Help,
        Some("version") => Command::Version,
        Some(other) => return Err(format!("unknown command: {other}")),
    };
    Ok(CliOptions {
        locale: UiLocale::from_opt(locale_arg.as_deref()),
        config_path,
        db_path,
        command,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            print_help(UiLocale::from_opt(std::env::var(LANG_ENV).ok().as_deref()));
            std::process::exit(2);
        }
    };
    match &options.command {
        Command::Help => {
            print_help(options.locale);
            return;
        }
        Command::Version => {
            println!("itemdex {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Command::Browse => {
            let launch = LaunchOptions {
                locale: Some(options.locale.code().to_string()),
                config_path: options.config_path.clone(),
                db_path: options.db_path.clone(),
            };
            if let Err(err) = itemdex_cui::run(launch) {
                eprintln!("{err}");
                std::process::exit(1);
            }
            return;
        }
        Command::List(_) | Command::Options(_) | Command::Config => {}
    }

    let catalog = match load_catalog(&options.load_options())
        .with_context(|| format!("load catalog from {}", options.config_path.display()))
    {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("{}", load_failure_message(Some(options.locale.code())));
            std::process::exit(1);
        }
    };
    if let Err(err) = execute(&options, &catalog) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn execute(options: &CliOptions, catalog: &Catalog) -> Result<()> {
    match &options.command {
        Command::List(args) => {
            let sort = catalog.resolve_sort_key(&args.sort);
            let mut found = catalog.search(&args.query, sort);
            let matched = found.len();
            if let Some(limit) = args.limit {
                found.truncate(limit);
            }
            let cards = catalog.cards(&found);
            match args.format {
                OutputFormat::Text => {
                    print_cards(options.locale, &cards);
                    println!("{}", catalog.summary(matched));
                }
                OutputFormat::Json => {
                    let output = ListOutput {
                        summary: catalog.summary(matched),
                        total: catalog.len(),
                        matched,
                        sort: sort.as_str(),
                        items: cards,
                    };
                    let json =
                        serde_json::to_string_pretty(&output).context("serialize item list")?;
                    println!("{json}");
                }
            }
        }
        Command::Options(format) => {
            let filter_options = catalog.filter_options();
            match format {
                OutputFormat::Text => print_options(options.locale, &filter_options),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&filter_options)
                        .context("serialize filter options")?;
                    println!("{json}");
                }
            }
        }
        Command::Config => {
            let json =
                serde_json::to_string_pretty(catalog.config()).context("serialize config")?;
            println!("{json}");
        }
        Command::Browse | Command::Help | Command::Version => {}
    }
    Ok(())
}

fn render_card(idx: usize, card: &CardView) -> Vec<String> {
    let mut title = format!("{:>3}. {}", idx + 1, card.title);
    if !card.subtitle.is_empty() && card.subtitle != card.title {
        title.push_str(&format!(" ({})", card.subtitle));
    }
    let mut lines = vec![title];
    for detail in [&card.meta, &card.stats] {
        if !detail.is_empty() {
            lines.push(format!("     {detail}"));
        }
    }
    if !card.chips.is_empty() {
        lines.push(format!("     #{}", card.chips.join(" #")));
    }
    lines
}

fn print_cards(locale: UiLocale, cards: &[CardView]) {
    if cards.is_empty() {
        println!("{}", locale.text("(no matching items)", "（没有匹配的物品）"));
        return;
    }
    for (idx, card) in cards.iter().enumerate() {
        for line in render_card(idx, card) {
            println!("{line}");
        }
    }
}

fn options_line(label: &str, values: &[String]) -> String {
    let mut entries = vec![ALL_LABEL.to_string()];
    entries.extend(values.iter().cloned());
    format!("{label:<8} {}", entries.join(", "))
}

fn print_options(locale: UiLocale, options: &FilterOptions) {
    println!("{}", options_line(locale.text("heroes", "英雄"), &options.heroes));
    println!("{}", options_line(locale.text("sizes", "尺寸"), &options.sizes));
    println!("{}", options_line(locale.text("tiers", "品质"), &options.tiers));
    println!("{:<8} {}", locale.text("tags", "标签"), options.tags.join(", "));
    let sorts: Vec<String> = options
        .sorts
        .iter()
        .map(|sort| format!("{}={}", sort.key, sort.label))
        .collect();
    println!("{:<8} {}", locale.text("sorts", "排序"), sorts.join(", "));
}

fn print_help(locale: UiLocale) {
    println!(
        "{}",
        locale.text(
            "Usage: itemdex [--config PATH] [--db PATH] [--lang en|zh] [COMMAND]",
            "用法：itemdex [--config 路径] [--db 路径] [--lang en|zh] [命令]"
        )
    );
    println!();
    println!("{}", locale.text("Commands:", "命令："));
    println!(
        "  (none)                   {}",
        locale.text("open the terminal browser", "打开终端浏览界面")
    );
    println!(
        "  list|ls                  {}",
        locale.text("print matching item cards", "打印匹配的物品卡片")
    );
    println!(
        "  options|opts             {}",
        locale.text("print selector values", "打印筛选项")
    );
    println!(
        "  config                   {}",
        locale.text("print the merged configuration", "打印合并后的配置")
    );
    println!("  help                     {}", locale.text("show help", "显示帮助"));
    println!("  version                  {}", locale.text("show version", "显示版本"));
    println!();
    println!("{}", locale.text("List options:", "list 选项："));
    println!(
        "  --keyword|-k TEXT        {}",
        locale.text("substring of names, skills, tags", "匹配名称、技能、标签")
    );
    println!(
        "  --hero/--size/--tier V   {}",
        locale.text("exact category value", "按分类精确筛选")
    );
    println!(
        "  --tag|-t TAG             {}",
        locale.text("required tag, repeatable", "必须包含的标签，可重复")
    );
    println!(
        "  --sort|-s KEY            {}",
        locale.text("name, damage, heal or shield", "name、damage、heal 或 shield")
    );
    println!(
        "  --format|-f text|json    {}",
        locale.text("output format (also for options)", "输出格式（options 同样适用）")
    );
    println!(
        "  --limit|-n N             {}",
        locale.text("print at most N cards", "最多打印 N 张卡片")
    );
    println!();
    println!(
        "{} {}",
        locale.text("Language can also be set with", "语言也可通过环境变量设置："),
        LANG_ENV
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn no_command_browses() {
        let options = parse_cli_options(&args(&["--config", "conf/config.json"])).expect("parse");
        assert_eq!(options.command, Command::Browse);
        assert_eq!(options.config_path, PathBuf::from("conf/config.json"));
    }

    #[test]
    fn parses_list_filters() {
        let options = parse_cli_options(&args(&[
            "list", "--keyword", "盾", "--hero", "杜利", "--tag", "武器", "--tag", "护盾",
            "--sort", "damage", "--format", "json", "--limit", "3",
        ]))
        .expect("parse");
        let Command::List(list) = options.command else {
            panic!("expected list command");
        };
        assert_eq!(list.query.keyword, "盾");
        assert_eq!(list.query.hero.as_deref(), Some("杜利"));
        assert_eq!(list.query.tags.len(), 2);
        assert_eq!(list.sort, "damage");
        assert_eq!(list.format, OutputFormat::Json);
        assert_eq!(list.limit, Some(3));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_cli_options(&args(&["list", "--limit", "x"])).is_err());
        assert!(parse_cli_options(&args(&["list", "--tag"])).is_err());
        assert!(parse_cli_options(&args(&["frobnicate"])).is_err());
        assert!(parse_cli_options(&args(&["--bogus"])).is_err());
        assert!(parse_cli_options(&args(&["list", "extra"])).is_err());
        assert!(parse_cli_options(&args(&["options", "--format", "xml"])).is_err());
    }

    #[test]
    fn renders_card_lines() {
        let card = CardView {
            id: "x".into(),
            title: "Cutlass".into(),
            subtitle: "Cutlass".into(),
            meta: "英雄: 瓦妮莎".into(),
            stats: String::new(),
            icon_url: "images/x.webp".into(),
            fallback_icon: itemdex_core::FALLBACK_ICON,
            icon_width: 36.0,
            icon_height: 72.0,
            chips: vec!["武器".into(), "伤害".into()],
        };
        assert_eq!(
            render_card(0, &card),
            ["  1. Cutlass", "     英雄: 瓦妮莎", "     #武器 #伤害"]
        );
    }

    #[test]
    fn keyword_option_searches_names_skills_and_tags() {
        let raws: Vec<itemdex_core::RawItem> = [
            serde_json::json!({"id": "a", "name_en": "Anchor", "heroes": "Dooley",
                               "skills": [{"en": "Deal damage", "cn": "造成伤害"}]}),
            serde_json::json!({"id": "b", "name_en": "Bow", "heroes": "Vanessa", "tags": "Ranged"}),
        ]
        .into_iter()
        .map(|value| serde_json::from_value(value).expect("raw"))
        .collect();
        let catalog = Catalog::new(itemdex_core::CatalogConfig::default(), raws);
        let search = |keyword: &str| {
            let options = parse_cli_options(&args(&["list", "--keyword", keyword])).expect("parse");
            let Command::List(list) = options.command else {
                panic!("expected list command");
            };
            catalog
                .search(&list.query, catalog.resolve_sort_key(&list.sort))
                .iter()
                .map(|item| item.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(search("造成"), ["a"]);
        assert_eq!(search("ranged"), ["b"]);
        assert_eq!(search("bow"), ["b"]);
        assert!(search("dooley").is_empty());
    }

    #[test]
    fn options_lines_lead_with_all() {
        assert_eq!(
            options_line("heroes", &["杜利".to_string()]),
            "heroes   全部, 杜利"
        );
    }
}
