use crate::io::{MessageSink, Severity};
use crate::models::coordinate::Coordinate;
use crate::models::devices::{Device, DeviceStatus};
use crate::models::enemy::EnemyKind;
use crate::models::quadrant::Quadrant;
use crate::services::combat::formulas::Absorption;
use crate::services::computer::{ScanEntry, StatusReport};

fn info<S: MessageSink + ?Sized>(output: &mut S, text: &str) {
    output.display_message(text, Severity::Info);
}

pub struct CombatPresenter;

impl CombatPresenter {
    pub fn show_enemy_hit<S: MessageSink + ?Sized>(
        kind: EnemyKind,
        sector: Coordinate,
        hit: f64,
        remaining: f64,
        output: &mut S,
    ) {
        info(
            output,
            &format!(
                "{:.0} unit hit on {} at sector {} ({:.0} left)",
                hit,
                kind.name(),
                sector,
                remaining.max(0.0)
            ),
        );
    }

    pub fn show_enemy_destroyed<S: MessageSink + ?Sized>(kind: EnemyKind, sector: Coordinate, output: &mut S) {
        output.display_message(
            &format!("*** {} at sector {} destroyed ***", kind.name(), sector),
            Severity::Warning,
        );
    }

    pub fn show_ship_hit<S: MessageSink + ?Sized>(
        attacker: EnemyKind,
        hit: f64,
        absorption: &Absorption,
        shields_left: f64,
        output: &mut S,
    ) {
        output.display_message(
            &format!(
                "{:.0} unit hit on the ship from {}; shields absorb {:.0}, {:.0} left",
                hit,
                attacker.name(),
                absorption.absorbed,
                shields_left
            ),
            Severity::Alert,
        );
    }

    pub fn show_victory<S: MessageSink + ?Sized>(rating: i32, output: &mut S) {
        output.display_message(
            "The last enemy ship in the galaxy has been destroyed",
            Severity::Alert,
        );
        info(output, &format!("Your efficiency rating = {}", rating));
    }

    pub fn show_defeat<S: MessageSink + ?Sized>(reason: &str, output: &mut S) {
        output.display_message(reason, Severity::Alert);
        info(output, "The Federation will be conquered");
    }
}

pub struct ScanPresenter;

impl ScanPresenter {
    /// Scan entries laid out on a 3x3 grid around the ship's quadrant.
    /// Off-galaxy cells print as blanks.
    pub fn show_long_range_scan<S: MessageSink + ?Sized>(entries: &[ScanEntry], output: &mut S) {
        let Some(centre) = entries.first().map(|e| e.quadrant) else {
            return;
        };
        info(output, &format!("Long-range scan for quadrant {}", centre));
        for dy in -1..=1 {
            let row: Vec<String> = (-1..=1)
                .map(|dx| {
                    let at = Coordinate::new(centre.x + dx, centre.y + dy);
                    entries
                        .iter()
                        .find(|e| e.quadrant == at)
                        .map_or_else(|| "   ".to_string(), |e| e.value.clone())
                })
                .collect();
            info(output, &format!(": {} :", row.join(" : ")));
        }
    }

    pub fn show_chart<S: MessageSink + ?Sized>(grid: &[Vec<String>], ship: Coordinate, output: &mut S) {
        info(output, &format!("Galaxy chart (ship in quadrant {})", ship));
        info(output, &format!("    {}", (0..grid.len()).map(|x| format!(" {}  ", x)).collect::<String>()));
        for (y, row) in grid.iter().enumerate() {
            let cells: String = row
                .iter()
                .enumerate()
                .map(|(x, value)| {
                    if ship == Coordinate::new(x as i32, y as i32) {
                        format!("[{}]", value)
                    } else {
                        format!(" {} ", value)
                    }
                })
                .collect();
            info(output, &format!("{:>2}: {}", y, cells));
        }
    }
}

pub struct StatusPresenter;

impl StatusPresenter {
    /// Short-range view of the quadrant with the status block beside it.
    pub fn show_status<S: MessageSink + ?Sized>(report: &StatusReport, quadrant: &Quadrant, output: &mut S) {
        let status = [
            format!("STARDATE   {:.2}", report.stardate),
            format!("CONDITION  {}", report.condition.label()),
            format!("QUADRANT   {}", report.quadrant),
            format!("SECTOR     {}", report.sector),
            format!("ENERGY     {:.0}", report.energy),
            format!(
                "SHIELDS    {} {:.0}",
                if report.shields_up { "UP" } else { "DOWN" },
                report.shield_energy
            ),
            format!("TORPEDOES  {}", report.torpedoes),
            format!("WARP       {:.1}", report.warp_factor),
            format!("ENEMIES    {}", report.enemies_left),
            format!("TIME LEFT  {:.2}", report.time_left),
        ];
        let border = "-=-".repeat(status.len());
        info(output, &border);
        for (y, line) in status.iter().enumerate() {
            info(output, &format!("{}    {}", quadrant.render_row(y as i32), line));
        }
        info(output, &border);
    }
}

pub struct DevicePresenter;

impl DevicePresenter {
    pub fn show_damage_report<S: MessageSink + ?Sized>(devices: &[Device], output: &mut S) {
        info(output, &format!("{:<16}{:<10}{}", "DEVICE", "STATUS", "REPAIR TIME"));
        for device in devices {
            let status = match device.status {
                DeviceStatus::Up => "up",
                DeviceStatus::Down => "down",
                DeviceStatus::Damaged => "damaged",
            };
            info(
                output,
                &format!("{:<16}{:<10}{:.2}", device.device_type.name(), status, device.damage),
            );
        }
    }
}

pub struct HelpPresenter;

impl HelpPresenter {
    pub fn show_help<S: MessageSink + ?Sized>(output: &mut S) {
        for line in [
            "Commands (any unique prefix of two or more letters):",
            "  rest <stardates>        wait in place while repairs proceed",
            "  phasers [power]         fire phasers; no power = automatic",
            "  photons [count]         fire photon torpedoes at the nearest enemies",
            "  warp <1-10>             set the warp factor",
            "  move <dx> <dy>          travel by an offset in quadrants",
            "  move <qx> <qy> <sx> <sy> travel to a quadrant and sector",
            "  shields up|down         raise or lower the shields",
            "  chart                   galaxy chart",
            "  lrscan                  long-range scan",
            "  damages                 damage report",
            "  dock                    dock at an adjacent starbase",
            "  save                    save the game",
            "  help                    this list",
            "  quit                    end the session",
        ] {
            info(output, line);
        }
    }
}
