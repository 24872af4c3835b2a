use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 17] = [
    "plan",
    "email",
    "first_name",
    "last_name",
    "phone",
    "address1",
    "city",
    "postal_code",
    "country",
    "password",
    "existing_user",
    "terms",
    "coupon",
    "method",
    "card_number",
    "expiry",
    "cvv",
];

/// Writes a requests CSV with `rows` identical wallet checkouts.
pub fn generate_requests_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;
    for i in 1..=rows {
        wtr.write_record([
            "advanced",
            &format!("buyer{i}@school.edu"),
            "Buyer",
            "Test",
            "",
            "123 Main Street",
            "New York",
            "10001",
            "US",
            "pw12345678",
            "false",
            "true",
            "",
            "wallet",
            "",
            "",
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
