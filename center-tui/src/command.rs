use center_core::{ClaimDraft, TicketDraft};

/// A line typed into the command box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewClaim(ClaimDraft),   // /claim VIN | branch | issue [| report]
    NewTicket(TicketDraft), // /ticket branch | priority | issue [| report]
    View(String),           // /view <name>
    Help,                   // /help
    Quit,                   // /quit or /exit
    Usage(Usage),
    Unknown(String),
}

/// Command whose arguments did not have the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Claim,
    Ticket,
    View,
}

/// Parse a command line.
///
/// ```
/// use center_tui::{Command, parse_command};
///
/// let Command::NewTicket(draft) = parse_command("/ticket jeddah | urgent | AC not cooling") else {
///     panic!("expected a ticket");
/// };
/// assert_eq!(draft.priority, "urgent");
/// assert_eq!(draft.report, None);
/// assert_eq!(parse_command("/exit"), Command::Quit);
/// ```
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Command::Unknown(trimmed.to_string());
    }
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or_default();
    let rest = parts.next().map(str::trim).unwrap_or_default();

    match verb {
        "/claim" => match fields(rest) {
            Some((vin, branch, issue, report)) => Command::NewClaim(ClaimDraft {
                vin,
                branch,
                issue,
                report,
            }),
            None => Command::Usage(Usage::Claim),
        },
        "/ticket" => match fields(rest) {
            Some((branch, priority, issue, report)) => Command::NewTicket(TicketDraft {
                branch,
                priority,
                issue,
                report,
            }),
            None => Command::Usage(Usage::Ticket),
        },
        "/view" if rest.is_empty() => Command::Usage(Usage::View),
        "/view" => Command::View(rest.to_string()),
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Split `a | b | c [| d]` into three required fields and an optional fourth.
fn fields(rest: &str) -> Option<(String, String, String, Option<String>)> {
    let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [a, b, c, tail @ ..]
            if tail.len() <= 1 && !a.is_empty() && !b.is_empty() && !c.is_empty() =>
        {
            let report = tail
                .first()
                .filter(|r| !r.is_empty())
                .map(|r| r.to_string());
            Some((a.to_string(), b.to_string(), c.to_string(), report))
        }
        _ => None,
    }
}
