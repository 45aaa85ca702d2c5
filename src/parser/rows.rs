use crate::config::SheetLayout;
use crate::sheet::CellSource;
use tracing::debug;

/// Ligne brute retenue : index de ligne, nom et numéro tels que lus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row: u32,
    pub name: String,
    pub number: String,
}

/// Parcourt toutes les lignes et garde celles qui décrivent un employé.
pub fn scan_rows<S: CellSource + ?Sized>(sheet: &S, layout: &SheetLayout) -> Vec<RawRow> {
    let mut out = Vec::new();
    for row in 0..sheet.row_count() {
        let name = sheet.cell_text(row, layout.name_col).trim().to_string();
        let number = sheet.cell_text(row, layout.number_col).trim().to_string();
        if layout.is_excluded(&name) || layout.is_excluded(&number) {
            continue;
        }
        if name.is_empty() && number.is_empty() {
            continue;
        }
        out.push(RawRow { row, name, number });
    }
    out
}

/// Réunit les employés répartis sur deux lignes (cellules fusionnées).
///
/// Une ligne d'index impair est rattachée à la ligne paire qui la précède
/// immédiatement : l'enregistrement garde l'index pair, le numéro de la ligne
/// paire et le nom de la ligne impaire, chaque champ vide étant complété par
/// l'autre moitié. Une ligne impaire sans partenaire est seulement ré-ancrée
/// sur l'index pair. Le résultat ne contient que des index pairs.
pub fn pair_merged_rows(rows: Vec<RawRow>) -> Vec<RawRow> {
    let mut out: Vec<RawRow> = Vec::with_capacity(rows.len());
    for row in rows {
        if row.row % 2 == 0 {
            out.push(row);
            continue;
        }
        let anchor = row.row - 1;
        match out.last_mut() {
            Some(prev) if prev.row == anchor => {
                debug!(row = row.row, anchor, "merging split employee row");
                if !row.name.is_empty() {
                    prev.name = row.name;
                }
                if prev.number.is_empty() {
                    prev.number = row.number;
                }
            }
            _ => out.push(RawRow { row: anchor, ..row }),
        }
    }
    out
}
