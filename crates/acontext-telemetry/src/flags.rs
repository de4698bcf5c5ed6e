use crate::tree::CommandNode;
use clap::ArgMatches;
use clap::parser::ValueSource;
use std::collections::BTreeMap;

/// Collect the flags the invoker actually typed.
///
/// A flag counts as set only when its value came from the command line.
/// Defaults never show up here, but a flag typed with its default value
/// does. Values are the raw strings as given; repeated values are joined
/// with `,` and a switch without a raw value reports `true`.
pub fn explicit_flags(node: &CommandNode, matches: &ArgMatches) -> BTreeMap<String, String> {
    matches
        .ids()
        .filter_map(|id| {
            let flag = node.flag(id.as_str())?;
            if matches.value_source(id.as_str()) != Some(ValueSource::CommandLine) {
                return None;
            }
            Some((flag.name.clone(), raw_value(matches, id.as_str())))
        })
        .collect()
}

fn raw_value(matches: &ArgMatches, id: &str) -> String {
    let values: Vec<String> = matches
        .try_get_raw(id)
        .ok()
        .flatten()
        .map(|raw| raw.map(|v| v.to_string_lossy().into_owned()).collect())
        .unwrap_or_default();

    if values.is_empty() {
        "true".to_string()
    } else {
        values.join(",")
    }
}
