// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_score(measures: usize, staffs: usize) -> String {
    let mut score = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<mei xmlns=\"http://www.music-encoding.org/ns/mei\">\n  <music>\n    <body>\n      <mdiv>\n        <score>\n          <section>\n",
    );

    for m in 1..=measures {
        score.push_str(&format!("            <measure xml:id=\"m{m}\" n=\"{m}\">\n"));
        for s in 1..=staffs {
            // Every other staff carries an identifier
            if s % 2 == 0 {
                score.push_str(&format!("              <staff xml:id=\"m{m}s{s}\" n=\"{s}\">\n"));
            } else {
                score.push_str(&format!("              <staff n=\"{s}\">\n"));
            }
            score.push_str("                <layer n=\"1\">\n");
            score.push_str(&format!(
                "                  <note xml:id=\"m{m}s{s}n1\" dur=\"4\" pname=\"c\" oct=\"4\"/>\n"
            ));
            score.push_str("                  <beam>\n");
            score.push_str("                    <note dur=\"8\" pname=\"d\" oct=\"4\"/>\n");
            score.push_str("                    <note dur=\"8\" pname=\"e\" oct=\"4\"/>\n");
            score.push_str("                  </beam>\n");
            score.push_str("                  <rest dur=\"2\"/>\n");
            score.push_str("                </layer>\n");
            score.push_str("              </staff>\n");
        }
        score.push_str("            </measure>\n");
    }

    score.push_str("          </section>\n        </score>\n      </mdiv>\n    </body>\n  </music>\n</mei>\n");
    score
}

/// Row of the last bare note in the score, the deepest upward walk.
#[allow(dead_code)]
pub fn last_bare_note_row(measures: usize, staffs: usize) -> usize {
    // 7 header rows, then per measure 1 opening row plus 10 rows per staff
    let per_measure = 2 + staffs * 10;
    7 + (measures - 1) * per_measure + 1 + (staffs - 1) * 10 + 5
}
