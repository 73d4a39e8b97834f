//! Static table descriptors: table name, route prefix, label and column list per entity.

/// Identifier column shared by every table.
pub const ID_COLUMN: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// User-defined enum type living in the table's schema.
    Enum,
    Other,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnInfo {
    pub name: &'static str,
    /// PostgreSQL type, used as a cast on every bound parameter so JSON strings and
    /// numbers land in date, timestamp, integer and enum columns.
    pub pg_type: &'static str,
    pub kind: ColumnKind,
}

pub const fn typed(name: &'static str, pg_type: &'static str) -> ColumnInfo {
    ColumnInfo {
        name,
        pg_type,
        kind: ColumnKind::Other,
    }
}

pub const fn col(name: &'static str) -> ColumnInfo {
    ColumnInfo {
        name,
        pg_type: "text",
        kind: ColumnKind::Text,
    }
}

/// Column of a user-defined enum type; written through a cast to that type, read as text.
pub const fn enum_col(name: &'static str, pg_type: &'static str) -> ColumnInfo {
    ColumnInfo {
        name,
        pg_type,
        kind: ColumnKind::Enum,
    }
}

#[derive(Debug)]
pub struct TableDef {
    pub table_name: &'static str,
    /// Route prefix without the leading slash, e.g. "bean-grinder-suggestions".
    pub path_segment: &'static str,
    /// Human label used in error messages, e.g. "Bean-grinder suggestion".
    pub label: &'static str,
    /// All columns including `id`, in table order.
    pub columns: &'static [ColumnInfo],
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns a create/update may write (everything but `id`).
    pub fn writable_columns(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|c| c.name != ID_COLUMN)
    }
}

pub static ROASTER: TableDef = TableDef {
    table_name: "roaster",
    path_segment: "roasters",
    label: "Roaster",
    columns: &[typed("id", "bigint"), col("name")],
};

pub static BEAN: TableDef = TableDef {
    table_name: "bean",
    path_segment: "beans",
    label: "Bean",
    columns: &[
        typed("id", "bigint"),
        col("name"),
        typed("roaster_id", "bigint"),
        enum_col("roast_level", "roast_level"),
        col("country_of_origin"),
        col("tasting_notes"),
        typed("rating", "integer"),
    ],
};

pub static BAG: TableDef = TableDef {
    table_name: "bag",
    path_segment: "bags",
    label: "Bag",
    columns: &[
        typed("id", "bigint"),
        col("name"),
        typed("bean_id", "bigint"),
        typed("roast_date", "date"),
        typed("weight", "double precision"),
        typed("price", "double precision"),
        col("purchase_location"),
        typed("rating", "integer"),
    ],
};

pub static GRINDER: TableDef = TableDef {
    table_name: "grinder",
    path_segment: "grinders",
    label: "Grinder",
    columns: &[
        typed("id", "bigint"),
        col("name"),
        col("user_manual_link"),
        col("image"),
        col("setting_guide_chart"),
    ],
};

pub static MACHINE: TableDef = TableDef {
    table_name: "machine",
    path_segment: "machines",
    label: "Machine",
    columns: &[
        typed("id", "bigint"),
        col("name"),
        col("manufacturer"),
        col("user_manual_link"),
        col("image"),
    ],
};

pub static BARISTA: TableDef = TableDef {
    table_name: "barista",
    path_segment: "baristas",
    label: "Barista",
    columns: &[typed("id", "bigint"), col("first_name"), col("last_name"), col("email")],
};

pub static BREW: TableDef = TableDef {
    table_name: "brew",
    path_segment: "brews",
    label: "Brew",
    columns: &[
        typed("id", "bigint"),
        col("name"),
        typed("machine_id", "bigint"),
        typed("bag_id", "bigint"),
        typed("grinder_id", "bigint"),
        typed("barista_id", "bigint"),
        typed("brew_time", "double precision"),
        typed("timestamp", "timestamptz"),
        typed("dose", "double precision"),
        typed("yield", "double precision"),
        typed("rating", "integer"),
        col("tasting_notes"),
        col("reflections"),
    ],
};

const SUGGESTION_FIELDS: [ColumnInfo; 4] = [
    typed("suggestion", "double precision"),
    col("friendly_suggestion"),
    col("suggestion_method"),
    typed("generation_timestamp", "timestamptz"),
];

pub static BEAN_GRINDER_SUGGESTION: TableDef = TableDef {
    table_name: "bean_grinder_suggestion",
    path_segment: "bean-grinder-suggestions",
    label: "Bean-grinder suggestion",
    columns: &[
        typed("id", "bigint"),
        typed("grinder_id", "bigint"),
        typed("bean_id", "bigint"),
        SUGGESTION_FIELDS[0],
        SUGGESTION_FIELDS[1],
        SUGGESTION_FIELDS[2],
        SUGGESTION_FIELDS[3],
    ],
};

pub static BAG_GRINDER_SUGGESTION: TableDef = TableDef {
    table_name: "bag_grinder_suggestion",
    path_segment: "bag-grinder-suggestions",
    label: "Bag-grinder suggestion",
    columns: &[
        typed("id", "bigint"),
        typed("grinder_id", "bigint"),
        typed("bag_id", "bigint"),
        SUGGESTION_FIELDS[0],
        SUGGESTION_FIELDS[1],
        SUGGESTION_FIELDS[2],
        SUGGESTION_FIELDS[3],
    ],
};

/// Every table, in route registration order.
pub static ALL_TABLES: [&TableDef; 9] = [
    &ROASTER,
    &BEAN,
    &MACHINE,
    &BARISTA,
    &BAG,
    &GRINDER,
    &BEAN_GRINDER_SUGGESTION,
    &BAG_GRINDER_SUGGESTION,
    &BREW,
];
