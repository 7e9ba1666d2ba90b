//! Match state and the deterministic tick loop

use tracing::{debug, info, trace};

use super::combat::CombatSystem;
use super::combatant::CombatantState;
use super::description::{CombatantId, MatchDescription};
use super::events::{EventLog, MatchEvent};
use super::physics::{ArenaBounds, PhysicsSystem};
use super::rng::DuelRng;

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Ticks are still being simulated
    Running,
    /// Terminal; further steps are no-ops
    Finished { winner: CombatantId },
}

/// Rung of the timeout ladder that decided the winner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    Health,
    DamageDealt,
    CoinFlip,
}

/// State of one running duel
pub struct DuelMatch<'d> {
    description: &'d MatchDescription,
    scale: i64,
    bounds: ArenaBounds,
    max_ticks: u64,
    tick: u64,
    a: CombatantState,
    b: CombatantState,
    events: EventLog,
    rng: DuelRng,
    phase: MatchPhase,
}

impl<'d> DuelMatch<'d> {
    /// Build the starting state. Fails if a combatant's weapon is not defined.
    pub fn new(description: &'d MatchDescription) -> Result<Self, MatchError> {
        let scale = description.sim.scale as i64;
        let a = Self::spawn(description, CombatantId::A, scale)?;
        let b = Self::spawn(description, CombatantId::B, scale)?;
        let arena = &description.arena;

        info!(
            seed = description.seed,
            scale,
            max_ticks = description.sim.max_ticks,
            "Match created"
        );

        Ok(Self {
            description,
            scale,
            bounds: ArenaBounds::new(arena.w, arena.h, arena.wall_restitution, scale),
            max_ticks: description.sim.max_ticks,
            tick: 0,
            a,
            b,
            events: EventLog::new(),
            rng: DuelRng::new(description.seed),
            phase: MatchPhase::Running,
        })
    }

    fn spawn(
        description: &MatchDescription,
        id: CombatantId,
        scale: i64,
    ) -> Result<CombatantState, MatchError> {
        let spec = description.combatants.get(id);
        let weapon = description
            .weapons
            .get(&spec.weapon)
            .ok_or_else(|| MatchError::UnknownWeapon {
                combatant: id,
                weapon: spec.weapon.clone(),
            })?;
        Ok(CombatantState::new(id, spec, weapon, description.seed, scale))
    }

    pub fn description(&self) -> &'d MatchDescription {
        self.description
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, MatchPhase::Finished { .. })
    }

    pub fn winner(&self) -> Option<CombatantId> {
        match self.phase {
            MatchPhase::Finished { winner } => Some(winner),
            MatchPhase::Running => None,
        }
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn combatant(&self, id: CombatantId) -> &CombatantState {
        match id {
            CombatantId::A => &self.a,
            CombatantId::B => &self.b,
        }
    }

    /// Advance the match by one step and return the resulting phase
    pub fn step(&mut self) -> MatchPhase {
        if self.is_finished() {
            return self.phase;
        }

        if let Some(winner) = self.survivor() {
            self.finish(winner);
            return self.phase;
        }

        if self.tick >= self.max_ticks {
            let (winner, rung) = self.resolve_timeout();
            debug!(tick = self.tick, winner = %winner, rung = ?rung, "Tick ceiling reached");
            self.events.push(MatchEvent::Timeout {
                tick: self.tick,
                winner,
            });
            self.finish(winner);
            return self.phase;
        }

        self.run_tick();

        if let Some(winner) = self.survivor() {
            self.finish(winner);
        }
        self.phase
    }

    /// Step until finished and return the winner
    pub fn run(&mut self) -> CombatantId {
        loop {
            if let MatchPhase::Finished { winner } = self.step() {
                return winner;
            }
        }
    }

    /// Run the physics pipeline once
    fn run_tick(&mut self) {
        let tick = self.tick;

        PhysicsSystem::rotate_weapon(&mut self.a);
        PhysicsSystem::rotate_weapon(&mut self.b);

        PhysicsSystem::translate(&mut self.a);
        PhysicsSystem::translate(&mut self.b);

        for body in [&mut self.a, &mut self.b] {
            let sides = PhysicsSystem::reflect_walls(body, &self.bounds);
            for side in sides.into_iter().flatten() {
                self.events.push(MatchEvent::Wall {
                    tick,
                    combatant: body.id,
                    side,
                });
            }
        }

        if PhysicsSystem::collide(&mut self.a, &mut self.b) {
            self.events.push(MatchEvent::Collide {
                tick,
                a: CombatantId::A,
                b: CombatantId::B,
            });
        }

        self.attack(CombatantId::A);
        self.attack(CombatantId::B);

        self.tick += 1;
    }

    fn attack(&mut self, from: CombatantId) {
        let (attacker, target) = match from {
            CombatantId::A => (&mut self.a, &mut self.b),
            CombatantId::B => (&mut self.b, &mut self.a),
        };

        let Some(hit) = CombatSystem::resolve_attack(attacker, target, &mut self.rng, self.scale)
        else {
            return;
        };

        trace!(tick = self.tick, from = %from, damage = hit.damage, "Hit");
        self.events.push(MatchEvent::Hit {
            tick: self.tick,
            from,
            to: from.other(),
            damage: hit.damage,
        });

        if hit.target_killed {
            debug!(tick = self.tick, combatant = %from.other(), "Combatant died");
            self.events.push(MatchEvent::Dead {
                tick: self.tick,
                combatant: from.other(),
            });
        }
    }

    /// Winner by elimination, if a combatant is down
    fn survivor(&self) -> Option<CombatantId> {
        if !self.a.alive {
            Some(CombatantId::B)
        } else if !self.b.alive {
            Some(CombatantId::A)
        } else {
            None
        }
    }

    /// Health, then damage dealt, then one draw from the shared stream
    fn resolve_timeout(&mut self) -> (CombatantId, TieBreak) {
        let (a, b) = (&self.a, &self.b);
        if a.health != b.health {
            let winner = if a.health > b.health {
                CombatantId::A
            } else {
                CombatantId::B
            };
            return (winner, TieBreak::Health);
        }
        if a.damage_dealt != b.damage_dealt {
            let winner = if a.damage_dealt > b.damage_dealt {
                CombatantId::A
            } else {
                CombatantId::B
            };
            return (winner, TieBreak::DamageDealt);
        }
        let winner = if self.rng.next_unit() < 0.5 {
            CombatantId::A
        } else {
            CombatantId::B
        };
        (winner, TieBreak::CoinFlip)
    }

    fn finish(&mut self, winner: CombatantId) {
        self.phase = MatchPhase::Finished { winner };
        info!(
            tick = self.tick,
            winner = %winner,
            events = self.events.len(),
            "Match finished"
        );
    }
}

/// Construct a match and step it until finished
pub fn run_to_completion(description: &MatchDescription) -> Result<DuelMatch<'_>, MatchError> {
    let mut duel = DuelMatch::new(description)?;
    duel.run();
    Ok(duel)
}

/// Errors raised while setting up a match
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("Combatant {combatant} references unknown weapon '{weapon}'")]
    UnknownWeapon {
        combatant: CombatantId,
        weapon: String,
    },
}
