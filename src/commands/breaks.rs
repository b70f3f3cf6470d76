use crate::{
    db::entries::Entries,
    libs::{datetime::resolve_at, entry::NewEntry, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct BreakArgs {
    /// What the break was, e.g. "lunch"
    #[arg(short, long)]
    note: Option<String>,

    /// End time of the break, defaults to now
    #[arg(long)]
    at: Option<String>,
}

pub fn cmd(args: BreakArgs) -> Result<()> {
    let at = resolve_at(args.at.as_deref())?;
    let note = args.note.unwrap_or_default();
    Entries::new()?.insert(&NewEntry::break_time(note.trim(), at))?;

    msg_success!(Message::BreakAdded);
    Ok(())
}
