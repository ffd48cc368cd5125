//! Runs one showcase scene: `showcase [orb|orbs|planet|universe|workstation]`.

use anyhow::{anyhow, Result};
use vitrine::scenes::SceneKind;

fn main() -> Result<()> {
    env_logger::init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "orbs".to_string());
    let kind = SceneKind::parse(&name).ok_or_else(|| {
        let known: Vec<&str> = SceneKind::ALL.iter().map(|kind| kind.name()).collect();
        anyhow!("unknown scene `{name}`, expected one of: {}", known.join(", "))
    })?;

    vitrine::showcase(kind)?.run()?;
    Ok(())
}
