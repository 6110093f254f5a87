//! Subcommand handlers. Each takes the store it needs as an argument.

use std::io::Write;

use tracing::{info, warn};

use crate::cli::{Commands, GenerateArgs};
use crate::clipboard;
use crate::errors::AppError;
use crate::password::generate;
use crate::random::{RandomSource, RngSource};
use crate::settings::Settings;
use crate::store::{Backend, FileBackend, PasswordStore};

pub fn dispatch(
    command: Commands,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match command {
        Commands::Generate(args) => {
            let password = match args.seed {
                Some(seed) => run_generate(&args, settings, &mut RngSource::seeded(seed)),
                None => run_generate(&args, settings, &mut RngSource::thread()),
            };
            finish_generate(&args, &password, out)?;

            // the store is only touched when the result gets a name
            if let Some(label) = &args.name {
                save(&mut open_store(settings)?, label, &password)?;
            }
            Ok(())
        }
        Commands::Save { label, password } => {
            save(&mut open_store(settings)?, &label, &password)
        }
        Commands::List => list(&open_store(settings)?, out),
        Commands::Get { label, copy } => get(&open_store(settings)?, &label, copy, out),
        Commands::Remove { label } => remove(&mut open_store(settings)?, &label),
    }
}

fn open_store(settings: &Settings) -> Result<PasswordStore<FileBackend>, AppError> {
    let path = settings.store_path().ok_or(AppError::NoDataDir)?;
    let backend = FileBackend::new(path).with_capacity(settings.store_capacity);
    info!(path = %backend.path().display(), "opening password store");

    Ok(PasswordStore::open(backend)?)
}

pub fn run_generate<R: RandomSource + ?Sized>(
    args: &GenerateArgs,
    settings: &Settings,
    rng: &mut R,
) -> String {
    let config = args.to_config(&settings.defaults);
    generate(&config, rng)
}

fn finish_generate(
    args: &GenerateArgs,
    password: &str,
    out: &mut impl Write,
) -> Result<(), AppError> {
    if password.is_empty() {
        warn!("no character classes enabled, generated an empty password");
    }

    print_line(out, password)?;

    if args.copy {
        copy_or_warn(password);
    }

    Ok(())
}

pub fn save<B: Backend>(
    store: &mut PasswordStore<B>,
    label: &str,
    password: &str,
) -> Result<(), AppError> {
    if label.is_empty() {
        warn!("empty label, nothing saved");
    }
    store.save(label, password)?;

    Ok(())
}

pub fn list<B: Backend>(store: &PasswordStore<B>, out: &mut impl Write) -> Result<(), AppError> {
    for (label, password) in store.load_all() {
        print_line(out, &format!("{}: {}", label, password))?;
    }

    Ok(())
}

pub fn get<B: Backend>(
    store: &PasswordStore<B>,
    label: &str,
    copy: bool,
    out: &mut impl Write,
) -> Result<(), AppError> {
    let password = store
        .get(label)
        .ok_or_else(|| AppError::UnknownLabel(label.to_string()))?;

    if copy {
        clipboard::copy(password)?;
        print_line(out, "Password copied to clipboard")?;
    } else {
        print_line(out, password)?;
    }

    Ok(())
}

pub fn remove<B: Backend>(store: &mut PasswordStore<B>, label: &str) -> Result<(), AppError> {
    if !store.remove(label)? {
        return Err(AppError::UnknownLabel(label.to_string()));
    }

    Ok(())
}

fn copy_or_warn(password: &str) {
    if let Err(e) = clipboard::copy(password) {
        warn!("clipboard copy failed: {}", e);
    }
}

fn print_line(out: &mut impl Write, line: &str) -> std::io::Result<()> {
    writeln!(out, "{}", line)
}
