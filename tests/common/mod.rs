use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes a script that opens `accounts` labelled accounts holding 100.0
/// each and then performs `transfers` random 1.0 transfers between
/// distinct accounts.
pub fn generate_transfer_script(
    path: &Path,
    accounts: usize,
    transfers: usize,
) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["op", "source", "target", "amount", "name"])?;
    for i in 1..=accounts {
        let label = format!("acc{i}");
        wtr.write_record(["open", label.as_str(), "", "100.0", ""])?;
    }

    let mut rng = rand::thread_rng();
    for _ in 0..transfers {
        let origin = rng.gen_range(1..=accounts);
        let mut destination = rng.gen_range(1..=accounts);
        while destination == origin {
            destination = rng.gen_range(1..=accounts);
        }
        let origin = format!("acc{origin}");
        let destination = format!("acc{destination}");
        wtr.write_record(["transfer", origin.as_str(), destination.as_str(), "1.0", ""])?;
    }

    wtr.flush()?;
    Ok(())
}
