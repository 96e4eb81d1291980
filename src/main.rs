// SPDX-License-Identifier: MPL-2.0
use lang_selector::app::config;
use lang_selector::app::paths;
use lang_selector::app::storage::FileStore;
use lang_selector::i18n::applier::{document_with_meta, Translator};
use lang_selector::i18n::loader::ConfiguredSource;
use lang_selector::i18n::locale::SystemLocale;
use lang_selector::i18n::Language;
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

const HELP: &str = "\
lang-selector

Resolves the page language, loads its translations and prints them.

USAGE:
  lang-selector [OPTIONS] [KEY...]

OPTIONS:
  --lang CODE         Select and persist a language (en, es, fr, pt)
  --locales BASE      Directory or http(s) URL holding <lang>.json files
  --config-dir DIR    Directory containing settings.toml
  --data-dir DIR      Directory for the stored language preference
  -h, --help          Print this help

ARGS:
  KEY                 Dot-path keys to print, e.g. nav.home
";

struct Flags {
    lang: Option<String>,
    locales: Option<String>,
    config_dir: Option<String>,
    data_dir: Option<String>,
    keys: Vec<String>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    Ok(Some(Flags {
        lang: args.opt_value_from_str("--lang")?,
        locales: args.opt_value_from_str("--locales")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        keys: args
            .finish()
            .into_iter()
            .filter_map(|s| s.into_string().ok())
            .collect(),
    }))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_overrides(flags.data_dir, flags.config_dir);
    let (config, config_warning) = config::load();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.filter.as_str()),
    )
    .init();

    if let Some(warning) = config_warning {
        log::warn!("Using default configuration: {warning}");
    }

    let base = flags.locales.unwrap_or(config.locales.base);
    let source = match ConfiguredSource::from_base(&base, &config.locales.user_agent) {
        Ok(source) => source,
        Err(err) => {
            log::error!("Cannot read translations from {base}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let store = match FileStore::open() {
        Ok((store, warning)) => {
            if let Some(warning) = warning {
                log::warn!("Ignoring stored preferences: {warning}");
            }
            store
        }
        Err(err) => {
            log::error!("Cannot open preference store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let document = Rc::new(RefCell::new(document_with_meta()));
    let translator = Translator::new(source, store, SystemLocale, document);

    match flags.lang {
        Some(code) => {
            let lang = Language::from_code(&code).unwrap_or_else(|| {
                log::warn!("Unsupported language {code:?}, using {}", Language::DEFAULT);
                Language::DEFAULT
            });
            translator.apply(lang).await;
        }
        None => {
            translator.initialize().await;
        }
    }

    let lang = translator.state().language;
    println!("language: {} ({})", lang.code(), lang.display_name());
    for key in &flags.keys {
        match translator.text(key) {
            Some(value) => println!("{key} = {value}"),
            None => println!("{key} = -"),
        }
    }

    ExitCode::SUCCESS
}
