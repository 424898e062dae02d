use std::io::Write;

use anyhow::{Context, Result};

use crate::archive::ArchiveBuilder;
use crate::cli::{Cli, Command};
use crate::font::FontKind;
use crate::fs_op::{self, WriteMode};
use crate::logging::init_logging;
use crate::relative_time;
use crate::settings::{load_settings, load_settings_from, Settings};

fn settings_for(cli: &Cli) -> Result<Settings> {
    match &cli.config {
        Some(p) => load_settings_from(p).with_context(|| format!("loading {}", p.display())),
        None => load_settings().context("loading default settings"),
    }
}

/// Execute a parsed command line, printing results to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let settings = settings_for(&cli)?;
    init_logging(&settings.log.level, cli.verbose);
    let copy = settings.copy_settings();

    match cli.command {
        Command::Copy { src, dest } => {
            let created = fs_op::copy_path_with(&src, &dest, &copy)
                .with_context(|| format!("copying {}", src.display()))?;
            writeln!(out, "{}", created.display())?;
        }
        Command::Move { src, dest } => {
            let created = fs_op::move_path_with(&src, &dest, &copy)
                .with_context(|| format!("moving {}", src.display()))?;
            writeln!(out, "{}", created.display())?;
        }
        Command::Delete { path } => {
            fs_op::remove_path(&path).with_context(|| format!("deleting {}", path.display()))?;
        }
        Command::Rename { path, new_name } => {
            let renamed = fs_op::rename_path(&path, &new_name)
                .with_context(|| format!("renaming {}", path.display()))?;
            writeln!(out, "{}", renamed.display())?;
        }
        Command::Write { path, text, append } => {
            let mode = if append { WriteMode::Append } else { WriteMode::Overwrite };
            fs_op::write_to_file(&path, text.as_bytes(), mode)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        Command::Cat { path } => {
            let text = fs_op::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            write!(out, "{}", text)?;
        }
        Command::Size { path } => {
            let size = fs_op::readable_size_of(&path)?;
            writeln!(out, "{}", size)?;
        }
        Command::Pack {
            root,
            output,
            name,
            compression,
        } => {
            let mut options = settings.archive_options();
            if let Some(c) = compression {
                options.compression = c;
            }
            let report = ArchiveBuilder::new(options)
                .build_report(&root, &output, name.as_deref())
                .with_context(|| format!("packing {}", root.display()))?;
            writeln!(
                out,
                "{} ({} files, {} directories)",
                report.path.display(),
                report.files,
                report.directories
            )?;
        }
        Command::List { archive } => {
            for entry in crate::archive::read_entries(&archive)? {
                if entry.is_dir() {
                    writeln!(out, "{}", entry.name)?;
                } else {
                    writeln!(out, "{}\t{}", entry.name, fs_op::readable_size(entry.size))?;
                }
            }
        }
        Command::Unpack { archive, output } => {
            let files = crate::archive::extract(&archive, &output)
                .with_context(|| format!("unpacking {}", archive.display()))?;
            writeln!(out, "{} files extracted to {}", files.len(), output.display())?;
        }
        Command::Font { path } => match FontKind::detect(&path) {
            Some(kind) => writeln!(out, "{}", kind.extension())?,
            None => anyhow::bail!("{} is not a TTF or OTF font", path.display()),
        },
        Command::Ago { epoch_ms, now } => {
            let text = match now {
                Some(now) => relative_time::to_relative_time_at(epoch_ms, now),
                None => relative_time::to_relative_time(epoch_ms),
            };
            writeln!(out, "{}", text)?;
        }
    }
    Ok(())
}
