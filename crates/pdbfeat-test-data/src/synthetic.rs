//! Write minimal fixed-column PDB text from explicit coordinates.

#[derive(Debug, Default, Clone)]
pub struct PdbBuilder {
    lines: Vec<String>,
    serial: usize,
}

impl PdbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `ATOM` record.
    pub fn atom(self, chain: char, res_id: i32, res_name: &str, atom_name: &str, coords: [f64; 3]) -> Self {
        self.record("ATOM", chain, res_id, res_name, atom_name, coords)
    }

    /// Add a `HETATM` record.
    pub fn hetatm(self, chain: char, res_id: i32, res_name: &str, atom_name: &str, coords: [f64; 3]) -> Self {
        self.record("HETATM", chain, res_id, res_name, atom_name, coords)
    }

    /// One `ALA` residue per coordinate in chain A, each carrying only a CA atom.
    /// Residues are numbered from 1.
    pub fn ca_trace(coords: &[[f64; 3]]) -> Self {
        coords
            .iter()
            .enumerate()
            .fold(Self::new(), |builder, (i, xyz)| {
                builder.atom('A', i as i32 + 1, "ALA", "CA", *xyz)
            })
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push_str("\nEND\n");
        text
    }

    fn record(
        mut self,
        record: &str,
        chain: char,
        res_id: i32,
        res_name: &str,
        atom_name: &str,
        coords: [f64; 3],
    ) -> Self {
        self.serial += 1;
        // atom names shorter than four characters start in column 14
        let name_field = if atom_name.len() >= 4 {
            atom_name.to_string()
        } else {
            format!(" {:<3}", atom_name)
        };
        let element: String = atom_name.chars().take(1).collect();
        let [x, y, z] = coords;
        self.lines.push(format!(
            "{:<6}{:>5} {:<4} {:>3} {}{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}  ",
            record, self.serial, name_field, res_name, chain, res_id, x, y, z, 1.0, 0.0, element
        ));
        self
    }
}
