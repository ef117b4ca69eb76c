//! The reference command set.
//!
//! | Command | Params | Purpose                                      |
//! |---------|--------|----------------------------------------------|
//! | `HELP`  | 0      | List every command, five to a line           |
//! | `RESET` | 0      | Count down, then reset the board             |
//! | `TEST`  | 1      | Run diagnostic `n`                           |
//! | `TEST2` | 3      | Fill and dump a scratch buffer               |
//! | `CLS`   | 0      | Scroll the terminal clear with blank lines   |

use core::fmt;

use super::buffer::LINE_CAPACITY;
use super::command::{CommandEntry, CommandTable, Context, Handler};
use super::error::Error;
use super::numeric::{parse_decimal, parse_hex};
use super::tokenizer::ParsedCommand;

/// Commands per line in the `HELP` listing.
pub const HELP_COLUMNS: usize = 5;

/// Number of countdown steps `RESET` prints before resetting.
pub const RESET_DELAY_STEPS: u32 = 3;

/// Delay between countdown steps in milliseconds.
pub const RESET_DELAY_MS: u32 = 250;

/// Blank lines `CLS` emits.
pub const CLS_LINES: usize = 25;

/// Bytes per line in the `TEST2` dump.
const DUMP_WIDTH: usize = 16;

/// The built-in command table.
pub static BUILTINS: CommandTable = CommandTable::new(&[
    CommandEntry {
        name: "HELP",
        handler: Handler::Function(help),
        max_params: 0,
        help: Some("List all commands"),
    },
    CommandEntry {
        name: "RESET",
        handler: Handler::Function(reset),
        max_params: 0,
        help: Some("Reset the board"),
    },
    CommandEntry {
        name: "TEST",
        handler: Handler::Function(test),
        max_params: 1,
        help: Some("TEST <n>: 0 alive, 1 tick count, 2 idle ticks, 3 line capacity"),
    },
    CommandEntry {
        name: "TEST2",
        handler: Handler::Function(test2),
        max_params: 3,
        help: Some("TEST2 <value hex> <offset> <count>: fill and dump scratch buffer"),
    },
    CommandEntry {
        name: "CLS",
        handler: Handler::Function(cls),
        max_params: 0,
        help: None,
    },
]);

fn help(ctx: &mut Context<'_>, _args: &ParsedCommand<'_>) -> fmt::Result {
    let entries = ctx.commands.entries();
    for (i, entry) in entries.iter().enumerate() {
        write!(ctx.out, "{:<8}", entry.name)?;
        if (i + 1) % HELP_COLUMNS == 0 {
            ctx.out.write_str("\r\n")?;
        }
    }
    if entries.len() % HELP_COLUMNS != 0 {
        ctx.out.write_str("\r\n")?;
    }
    Ok(())
}

fn reset(ctx: &mut Context<'_>, _args: &ParsedCommand<'_>) -> fmt::Result {
    ctx.out.write_str("Resetting in ")?;
    for step in (1..=RESET_DELAY_STEPS).rev() {
        write!(ctx.out, "{step}..")?;
        ctx.platform.delay_ms(RESET_DELAY_MS);
    }
    ctx.out.write_str("\r\n")?;
    ctx.platform.reset();
    Ok(())
}

fn test(ctx: &mut Context<'_>, args: &ParsedCommand<'_>) -> fmt::Result {
    let Some(selector) = numeric_param(ctx, args, 0, parse_decimal)? else {
        return Ok(());
    };

    match selector {
        0 => ctx.out.write_str("Shell alive\r\n"),
        1 => write!(ctx.out, "Ticks: {}\r\n", ctx.ticks.cumulative()),
        2 => write!(ctx.out, "Idle ticks: {}\r\n", ctx.idle_ticks),
        3 => write!(ctx.out, "Line capacity: {LINE_CAPACITY}\r\n"),
        other => write!(ctx.out, "Unknown test {other}\r\n"),
    }
}

fn test2(ctx: &mut Context<'_>, args: &ParsedCommand<'_>) -> fmt::Result {
    let Some(value) = numeric_param(ctx, args, 0, parse_hex)? else {
        return Ok(());
    };
    let Some(offset) = numeric_param(ctx, args, 1, parse_decimal)? else {
        return Ok(());
    };
    let Some(count) = numeric_param(ctx, args, 2, parse_decimal)? else {
        return Ok(());
    };

    let mut scratch = [0u8; LINE_CAPACITY];
    let value = u8::try_from(value).ok();
    let span = (offset as usize)
        .checked_add(count as usize)
        .filter(|&end| end <= scratch.len())
        .map(|end| offset as usize..end);
    let (Some(value), Some(span)) = (value, span) else {
        return report(ctx, Error::OutOfRange);
    };

    scratch[span.clone()].fill(value);
    write!(ctx.out, "Filled {count} bytes at {offset} with {value:02X}\r\n")?;
    for line in scratch[span].chunks(DUMP_WIDTH) {
        for byte in line {
            write!(ctx.out, "{byte:02X} ")?;
        }
        ctx.out.write_str("\r\n")?;
    }
    Ok(())
}

fn cls(ctx: &mut Context<'_>, _args: &ParsedCommand<'_>) -> fmt::Result {
    for _ in 0..CLS_LINES {
        ctx.out.write_str("\r\n")?;
    }
    Ok(())
}

/// Parse parameter `index`, printing the reason and yielding `None` when it
/// is missing or malformed.
fn numeric_param(
    ctx: &mut Context<'_>,
    args: &ParsedCommand<'_>,
    index: usize,
    parse: fn(&[u8]) -> Result<u32, Error>,
) -> Result<Option<u32>, fmt::Error> {
    let parsed = args.param(index).ok_or(Error::MissingParameter).and_then(parse);
    match parsed {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            report(ctx, error)?;
            Ok(None)
        }
    }
}

fn report(ctx: &mut Context<'_>, error: Error) -> fmt::Result {
    write!(ctx.out, "{error}\r\n")
}
