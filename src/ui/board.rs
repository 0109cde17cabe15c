use crate::game::{GameEvent, RunStats, Symbol};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Concealed,
    /// Shown during the memorize window, not selected.
    Shown(Symbol),
    Selected(Symbol),
    Removed,
}

/// Render-side copy of the board, kept in sync from the event stream only.
#[derive(Clone, Debug)]
pub struct BoardMirror {
    rows: usize,
    columns: usize,
    cells: Vec<CellView>,
    selectable: Vec<bool>,
    won: Option<RunStats>,
}

impl BoardMirror {
    pub fn new(rows: usize, columns: usize) -> Self {
        let total = rows * columns;
        BoardMirror {
            rows,
            columns,
            cells: vec![CellView::Concealed; total],
            selectable: vec![false; total],
            won: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, index: usize) -> Option<&CellView> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[CellView] {
        &self.cells
    }

    pub fn is_selectable(&self, index: usize) -> bool {
        self.selectable.get(index).copied().unwrap_or(false)
    }

    pub fn won(&self) -> Option<&RunStats> {
        self.won.as_ref()
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::CardsRevealedAll { cards } => {
                self.cells = vec![CellView::Concealed; cards.len()];
                self.selectable = vec![false; cards.len()];
                self.won = None;
                for card in cards {
                    if let Some(cell) = self.cells.get_mut(card.index) {
                        *cell = CellView::Shown(card.symbol.clone());
                    }
                }
            }
            GameEvent::CardsEnabled { indices } => {
                for &index in indices {
                    if let Some(cell) = self.cells.get_mut(index) {
                        if matches!(cell, CellView::Shown(_)) {
                            *cell = CellView::Concealed;
                        }
                        if *cell == CellView::Concealed {
                            self.selectable[index] = true;
                        }
                    }
                }
            }
            GameEvent::CardDisabled { index, symbol } => {
                self.set(*index, CellView::Selected(symbol.clone()), false);
            }
            GameEvent::CardsMatched { .. } => {}
            GameEvent::CardRemoved { index } => {
                self.set(*index, CellView::Removed, false);
            }
            GameEvent::CardsMismatched { first, second } => {
                self.set(*first, CellView::Concealed, true);
                self.set(*second, CellView::Concealed, true);
            }
            GameEvent::GameWon { stats } => {
                self.won = Some(*stats);
            }
        }
    }

    fn set(&mut self, index: usize, view: CellView, selectable: bool) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = view;
            self.selectable[index] = selectable;
        }
    }

    /// Text grid with row and column labels.
    pub fn render_text(&self) -> String {
        let mut out = String::from("   ");
        for column in 0..self.columns {
            out.push_str(&format!(" {:^3}", column));
        }
        out.push('\n');
        for row in 0..self.rows {
            out.push_str(&format!("{:>2} ", row));
            for column in 0..self.columns {
                let cell = self
                    .cells
                    .get(row * self.columns + column)
                    .unwrap_or(&CellView::Removed);
                let text = match cell {
                    CellView::Concealed => " ## ".to_string(),
                    CellView::Shown(symbol) => format!(" {symbol} "),
                    CellView::Selected(symbol) => format!("[{symbol}]"),
                    CellView::Removed => "    ".to_string(),
                };
                out.push_str(&text);
            }
            out.push('\n');
        }
        out
    }
}
