use crate::cli::{RestrictionLevel, Tier};
use crate::commands::session::Session;
use crate::services::output::{
    apply_line, maintenance_line, restrict_line, revert_line, status_line, vendor_line,
};
use crate::services::whitelist::{
    looks_fully_qualified, parse_index, resolve_search, search, AddOutcome, RemoveOutcome,
};
use clap::ValueEnum;
use std::io::{BufRead, Write};

const MAIN_MENU: &str = "\
1. Check battery status
2. Apply safe profile
3. Apply aggressive profile
4. Apply extreme profile
5. Restrict third-party background apps
6. Manage whitelist
7. Vendor profile (Samsung)
8. Background optimization
9. Revert all changes
10. Exit";

const WHITELIST_MENU: &str = "\
1. Add package
2. Remove package
3. Back";

/// Line-driven operator menu. End of input behaves like choosing exit.
pub struct Menu<'a, 't> {
    session: &'a mut Session<'t>,
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
}

impl<'a, 't> Menu<'a, 't> {
    pub fn new(
        session: &'a mut Session<'t>,
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            session,
            input,
            out,
        }
    }

    /// `None` on end of input.
    fn prompt(&mut self, message: &str) -> anyhow::Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.out, "\n=== Battery Profiles ===\n{}", MAIN_MENU)?;
            let Some(choice) = self.prompt("Choice: ")? else {
                return Ok(());
            };
            let text = match choice.as_str() {
                "1" => status_line(&self.session.status()),
                "2" => apply_line(&self.session.apply(Tier::Safe)),
                "3" => apply_line(&self.session.apply(Tier::Aggressive)),
                "4" => apply_line(&self.session.apply(Tier::Extreme)),
                "5" => match self.ask_level()? {
                    Some(level) => match self.session.restrict(level) {
                        Ok(report) => restrict_line(&report),
                        Err(err) => format!("error: {:#}", err),
                    },
                    None => continue,
                },
                "6" => {
                    if !self.whitelist_menu()? {
                        return Ok(());
                    }
                    continue;
                }
                "7" => match self.ask_tier()? {
                    Some(tier) => vendor_line(&self.session.vendor(tier)),
                    None => continue,
                },
                "8" => maintenance_line(&self.session.optimize_background()),
                "9" => revert_line(&self.session.revert()),
                "10" => return Ok(()),
                other => format!("invalid choice '{}'", other),
            };
            writeln!(self.out, "{}", text)?;
        }
    }

    fn ask_level(&mut self) -> anyhow::Result<Option<RestrictionLevel>> {
        let Some(raw) = self.prompt("Level [ignore/allow] (default ignore): ")? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(Some(RestrictionLevel::Restrict));
        }
        match RestrictionLevel::from_str(&raw, true) {
            Ok(level) => Ok(Some(level)),
            Err(_) => {
                writeln!(self.out, "invalid level '{}'", raw)?;
                Ok(None)
            }
        }
    }

    fn ask_tier(&mut self) -> anyhow::Result<Option<Tier>> {
        let names: Vec<&str> = Tier::ALL.iter().map(Tier::as_str).collect();
        let Some(raw) = self.prompt(&format!("Tier [{}]: ", names.join("/")))? else {
            return Ok(None);
        };
        match Tier::from_str(&raw, true) {
            Ok(tier) => Ok(Some(tier)),
            Err(_) => {
                writeln!(self.out, "invalid tier '{}'", raw)?;
                Ok(None)
            }
        }
    }

    /// Returns `false` when input ended inside the submenu.
    fn whitelist_menu(&mut self) -> anyhow::Result<bool> {
        loop {
            match self.session.whitelist.load() {
                Ok(entries) if entries.is_empty() => writeln!(self.out, "\nwhitelist is empty")?,
                Ok(entries) => {
                    writeln!(self.out, "\nwhitelisted packages:")?;
                    for (i, p) in entries.iter().enumerate() {
                        writeln!(self.out, "{}. {}", i + 1, p)?;
                    }
                }
                Err(err) => writeln!(self.out, "error: {:#}", err)?,
            }
            writeln!(self.out, "{}", WHITELIST_MENU)?;
            let Some(choice) = self.prompt("Choice: ")? else {
                return Ok(false);
            };
            let done = match choice.as_str() {
                "1" => self.add_to_whitelist()?,
                "2" => self.remove_from_whitelist()?,
                "3" => return Ok(true),
                other => {
                    writeln!(self.out, "invalid choice '{}'", other)?;
                    true
                }
            };
            if !done {
                return Ok(false);
            }
        }
    }

    fn add_to_whitelist(&mut self) -> anyhow::Result<bool> {
        let Some(query) = self.prompt("Package name (full id or part of it): ")? else {
            return Ok(false);
        };
        let id = if looks_fully_qualified(&query) {
            query
        } else {
            let matches = search(&self.session.installed_packages(), &query);
            if matches.len() > 1 {
                for (i, p) in matches.iter().enumerate() {
                    writeln!(self.out, "{}. {}", i + 1, p)?;
                }
                let Some(raw) = self.prompt("Pick a number: ")? else {
                    return Ok(false);
                };
                match parse_index(&raw) {
                    Some(n) => match resolve_search(&query, &matches, Some(n)) {
                        Ok(id) => id,
                        Err(err) => {
                            writeln!(self.out, "{}", err)?;
                            return Ok(true);
                        }
                    },
                    None => {
                        writeln!(self.out, "invalid number '{}'", raw)?;
                        return Ok(true);
                    }
                }
            } else {
                match resolve_search(&query, &matches, None) {
                    Ok(id) => id,
                    Err(err) => {
                        writeln!(self.out, "{}", err)?;
                        return Ok(true);
                    }
                }
            }
        };
        let text = match self.session.whitelist.add(&id) {
            Ok(AddOutcome::Added(p)) => format!("added {} to whitelist", p),
            Ok(AddOutcome::AlreadyPresent(p)) => format!("{} is already whitelisted", p),
            Err(err) => format!("error: {:#}", err),
        };
        writeln!(self.out, "{}", text)?;
        Ok(true)
    }

    fn remove_from_whitelist(&mut self) -> anyhow::Result<bool> {
        let Some(raw) = self.prompt("Number to remove: ")? else {
            return Ok(false);
        };
        let text = match parse_index(&raw) {
            None => format!("invalid number '{}'", raw),
            Some(i) => match self.session.whitelist.remove(i) {
                Ok(RemoveOutcome::Removed(p)) => format!("removed {} from whitelist", p),
                Ok(RemoveOutcome::OutOfRange { index, len }) => {
                    format!("no whitelist entry {} ({} entries)", index, len)
                }
                Err(err) => format!("error: {:#}", err),
            },
        };
        writeln!(self.out, "{}", text)?;
        Ok(true)
    }
}
