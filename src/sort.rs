//! Sort column and direction sent to the backend.

/// Columns the backend can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    /// Reporting date
    Date,
    /// Total revenue
    Revenue,
    /// Net income
    NetIncome,
}

impl SortColumn {
    /// Sortable columns, in table order.
    pub const ALL: [SortColumn; 3] = [SortColumn::Date, SortColumn::Revenue, SortColumn::NetIncome];

    /// Value of the `sortBy` query parameter.
    pub fn key(self) -> &'static str {
        match self {
            SortColumn::Date => "date",
            SortColumn::Revenue => "revenue",
            SortColumn::NetIncome => "netIncome",
        }
    }

    /// Header label.
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::Date => "Date",
            SortColumn::Revenue => "Revenue",
            SortColumn::NetIncome => "Net Income",
        }
    }

    /// Column index in the rendered table.
    pub fn index(self) -> usize {
        match self {
            SortColumn::Date => 0,
            SortColumn::Revenue => 1,
            SortColumn::NetIncome => 2,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest or earliest first (`asc`)
    Ascending,
    /// Largest or latest first (`desc`)
    Descending,
}

impl SortOrder {
    /// Value of the `order` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Arrow shown next to the active header.
    pub fn indicator(self) -> &'static str {
        match self {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: SortColumn::Date,
            order: SortOrder::Descending,
        }
    }
}

impl SortSpec {
    /// Sort spec after the user activates `column`.
    ///
    /// # Details
    /// Activating the current column flips its direction. Activating another
    /// column selects it in ascending order.
    pub fn toggled(self, column: SortColumn) -> Self {
        if column == self.column {
            Self {
                column,
                order: self.order.flipped(),
            }
        } else {
            Self {
                column,
                order: SortOrder::Ascending,
            }
        }
    }

    /// Indicator for `column`, or `None` if it is not the active column.
    pub fn indicator_for(&self, column: SortColumn) -> Option<&'static str> {
        (self.column == column).then(|| self.order.indicator())
    }
}
