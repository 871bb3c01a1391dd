use anyhow::Result;
use routedeck::DrawerOutcome;
use serde_json::json;

/// Print a plain-text representation of the drawer outcome.
pub(crate) fn print_plain(outcome: &DrawerOutcome) {
	let Some(target) = outcome.target.as_ref().filter(|_| outcome.accepted) else {
		println!("Search cancelled (query: '{}')", outcome.query);
		return;
	};

	let station = target
		.state
		.as_ref()
		.and_then(|state| state.get("station"))
		.and_then(|station| station.as_str());
	match station {
		Some(station) => println!("{}\t{station}", target.path),
		None => println!("{}", target.path),
	}
}

/// Format the drawer outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &DrawerOutcome) -> Result<String> {
	let payload = json!({
		"accepted": outcome.accepted,
		"query": outcome.query,
		"path": outcome.target.as_ref().map(|target| target.path.as_str()),
		"route": outcome.target.as_ref().and_then(|target| target.state.clone()),
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn print_json(outcome: &DrawerOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
