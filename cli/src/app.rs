use std::io::Write;

use sweeper_core::{GameConfig, Placement, RandomMinefieldGenerator, Session};

use crate::command::{Command, HELP};
use crate::render;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Holds the single live session and replaces it on every new game.
pub struct App {
    config: GameConfig,
    placement: Placement,
    next_seed: u64,
    session: Session,
}

impl App {
    pub fn new(config: GameConfig, placement: Placement, seed: u64) -> anyhow::Result<Self> {
        let session = start_session(config, placement, seed)?;
        Ok(Self {
            config,
            placement,
            next_seed: seed.wrapping_add(1),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn new_game(&mut self) -> anyhow::Result<()> {
        self.session = start_session(self.config, self.placement, self.next_seed)?;
        self.next_seed = self.next_seed.wrapping_add(1);
        Ok(())
    }

    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
        match command {
            Command::Reveal(coords) => match self.session.reveal(coords) {
                Ok(report) if report.has_update() => {
                    log::debug!("reveal {:?} changed {} cells", coords, report.changed.len());
                    self.print(out)?;
                }
                Ok(_) => writeln!(out, "nothing to reveal at {:?}", coords)?,
                Err(err) => writeln!(out, "cannot reveal {:?}: {}", coords, err)?,
            },
            Command::Flag(coords) => match self.session.toggle_flag(coords) {
                Ok(outcome) if outcome.has_update() => {
                    log::debug!("flag {:?}: {:?}", coords, outcome);
                    self.print(out)?;
                }
                Ok(_) => writeln!(out, "cannot flag revealed cell {:?}", coords)?,
                Err(err) => writeln!(out, "cannot flag {:?}: {}", coords, err)?,
            },
            Command::New => {
                self.new_game()?;
                self.print(out)?;
            }
            Command::Show => self.print(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn print(&self, out: &mut impl Write) -> std::io::Result<()> {
        write!(out, "{}", render::board(&self.session))?;
        writeln!(out, "{}", render::status(&self.session))?;
        if self.session.is_finished() {
            writeln!(out, "type `n` for a new game")?;
        }
        Ok(())
    }
}

fn start_session(config: GameConfig, placement: Placement, seed: u64) -> anyhow::Result<Session> {
    log::debug!("seed: {}", seed);
    let generator = RandomMinefieldGenerator::new(seed).with_placement(placement);
    Ok(Session::start_with(generator, config)?)
}
