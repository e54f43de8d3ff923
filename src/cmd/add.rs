use anyhow::Result;
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;

use weightlog::core::conflict::{ConflictResolver, Decision, Resolution, Submission};
use weightlog::core::validate::{EntryForm, EntryValidator};
use weightlog::models::{WeightEntry, WeightUnit};
use weightlog::output;
use weightlog::output::human;

pub struct AddArgs {
    pub weight: String,
    pub muscle: String,
    pub fat: String,
    pub visceral: String,
    pub date: Option<NaiveDate>,
    pub image: Option<PathBuf>,
    pub decision: Option<Decision>,
}

pub fn preset_decision(yes: bool, no: bool) -> Option<Decision> {
    match (yes, no) {
        (true, _) => Some(Decision::Replace),
        (_, true) => Some(Decision::Keep),
        _ => None,
    }
}

pub fn run(args: AddArgs, unit: Option<WeightUnit>, human_flag: bool) -> Result<()> {
    let (config, mut store) = super::open_store()?;
    let unit = super::active_unit(&config, unit);

    let mut form = EntryForm::new(super::entry_timestamp(args.date)?, unit);
    form.weight = args.weight;
    form.muscle_mass = args.muscle;
    form.body_fat = args.fat;
    form.visceral_fat = args.visceral;
    if let Some(path) = &args.image {
        form.image = Some(std::fs::read(path)?);
    }

    let validator = EntryValidator::new(config.limits);
    let candidate = validator.validate(&form, Utc::now())?;

    let mut resolver = ConflictResolver::new();
    let (action, change) = match resolver.submit(&mut store, candidate)? {
        Submission::Created(change) => ("created", Some(change)),
        Submission::NeedsConfirmation { existing } => {
            let decision = match args.decision {
                Some(d) => d,
                None => confirm_replace(&existing, unit)?,
            };
            match resolver.resolve(&mut store, decision)? {
                Resolution::Replaced(change) => ("replaced", Some(change)),
                Resolution::Kept => ("kept", None),
            }
        }
    };

    // On "kept" the day's untouched entry is reported.
    let entry = match change.as_ref().and_then(|c| c.entry_id()) {
        Some(id) => store.get(id),
        None => store.find_by_day(form.date),
    };

    if human_flag {
        match (action, entry) {
            ("kept", Some(e)) => println!("Kept existing: {}", human::format_entry(e, unit)),
            (_, Some(e)) => println!("{}: {}", capitalize(action), human::format_entry(e, unit)),
            _ => {}
        }
        if let Some(c) = &change {
            super::warn_if_unsaved(c);
        }
    } else {
        let mut data = json!({
            "action": action,
            "entry": entry.map(|e| output::entry_view(e, unit)),
        });
        if let Some(c) = &change {
            data["durability"] = super::durability(c);
        }
        let out = output::success("add", data);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

/// Ask on the terminal whether the same-day entry should be replaced.
fn confirm_replace(existing: &WeightEntry, unit: WeightUnit) -> Result<Decision> {
    let mut stderr = io::stderr();
    writeln!(stderr, "{}", "Record already exists".yellow().bold())?;
    writeln!(stderr, "  {}", human::format_entry(existing, unit))?;
    write!(stderr, "Replace existing record? [y/N]: ")?;
    stderr.flush()?;

    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(match buf.trim().to_lowercase().as_str() {
        "y" | "yes" => Decision::Replace,
        _ => Decision::Keep,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
