use console::Term;

use layr_common::config::Config;
use layr_common::warn;

/// Gates the destructive in-place rewrite.
///
/// ENTER proceeds, any other input aborts. `--yes` skips the prompt, and a
/// non-interactive stdin refuses rather than guessing.
pub fn confirm(cfg: &Config) -> anyhow::Result<bool> {
    if cfg.assume_yes {
        return Ok(true);
    }

    let term = Term::stdout();
    if !term.is_term() {
        anyhow::bail!("stdin is not a terminal; pass --yes to rewrite files anyway");
    }

    term.write_str("Press ENTER to proceed or anything else to quit. ")?;
    let answer = term.read_line()?;

    if answer.trim().is_empty() {
        Ok(true)
    } else {
        warn!("Giving up & going to a movie.");
        Ok(false)
    }
}
