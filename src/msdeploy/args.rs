// ABOUTME: Splits an msdeploy argument string into discrete process arguments.
// ABOUTME: Honors double-quote grouping and \" escapes inside quoted runs.

/// Split a command-line string into arguments.
///
/// Rules:
/// - `"` toggles quoted mode and is dropped from the output.
/// - Inside quotes, `\"` yields a literal quote. A backslash before any other
///   character is kept as-is.
/// - Outside quotes, spaces separate arguments; runs of spaces collapse.
///
/// Unbalanced quotes are not an error: the remainder of the input is treated
/// as one quoted run.
pub fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in line.chars() {
        if c == '"' {
            if escaped {
                current.push(c);
                escaped = false;
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }

        if escaped {
            // Only quotes are escapable; restore the backslash.
            current.push('\\');
            escaped = false;
            if c == '\\' {
                current.push(c);
                continue;
            }
        } else if c == '\\' && in_quotes {
            escaped = true;
            continue;
        }

        if c == ' ' && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(c);
    }

    if escaped {
        current.push('\\');
    }
    if !current.is_empty() {
        args.push(current);
    }

    args
}
