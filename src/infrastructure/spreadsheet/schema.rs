// Declarative column resolution
// Each canonical field lists the header spellings found in the sheets

use std::collections::HashMap;

use crate::domain::errors::{DiarioError, DiarioResult};

/// One canonical field of a table and the headers accepted for it
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

/// The column contract of one spreadsheet
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub columns: &'static [ColumnSpec],
}

const fn required(field: &'static str, aliases: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        field,
        aliases,
        required: true,
    }
}

const fn optional(field: &'static str, aliases: &'static [&'static str]) -> ColumnSpec {
    ColumnSpec {
        field,
        aliases,
        required: false,
    }
}

const REPRESENTATIVE_ALIASES: &[&str] = &[
    "representante",
    "rep",
    "codigo_representante",
    "cod_representante",
    "representative",
];
const COLLECTION_ALIASES: &[&str] = &["colecao", "coleção", "collection_name"];
const CLIENT_ALIASES: &[&str] = &["cliente", "client", "nome_cliente", "customer"];

pub const USERS: TableSchema = TableSchema {
    columns: &[
        required("email", &["e-mail", "usuario", "usuário", "user", "login"]),
        required("password", &["senha", "pass"]),
        optional("display_name", &["nome", "name", "nome_exibicao"]),
        required("representative_id", REPRESENTATIVE_ALIASES),
    ],
};

pub const SALES: TableSchema = TableSchema {
    columns: &[
        required("representative_id", REPRESENTATIVE_ALIASES),
        required("client_name", CLIENT_ALIASES),
        optional("city", &["cidade"]),
        required("collection", COLLECTION_ALIASES),
        optional("brand", &["marca"]),
        optional("quantity", &["quantidade", "qtd", "qtde"]),
        required("amount", &["valor", "vendas", "valor_total", "valor_venda"]),
        optional("discount", &["desconto"]),
        optional("term", &["prazo", "condicao_pagamento"]),
        optional("date", &["data", "data_venda", "data_visita"]),
    ],
};

pub const GOALS: TableSchema = TableSchema {
    columns: &[
        required("representative_id", REPRESENTATIVE_ALIASES),
        required("collection", COLLECTION_ALIASES),
        required(
            "sales_target_amount",
            &["meta", "meta_valor", "meta_vendas", "meta_colecao", "sales_target"],
        ),
        required(
            "client_count_target",
            &["meta_clientes", "clientes_meta", "client_target"],
        ),
    ],
};

pub const WEEKLY_SCHEDULE: TableSchema = TableSchema {
    columns: &[
        required("collection", COLLECTION_ALIASES),
        required(
            "period_start",
            &["semana_inicio", "semana_início", "inicio", "início", "start"],
        ),
        required("period_end", &["semana_fim", "fim", "end"]),
        required(
            "percent_of_collection_goal",
            &["percentual", "percentual_meta", "percent", "pct", "%_meta"],
        ),
    ],
};

pub const ACTION_ITEMS: TableSchema = TableSchema {
    columns: &[
        optional("id", &["codigo", "código"]),
        required("representative_id", REPRESENTATIVE_ALIASES),
        required("client_name", CLIENT_ALIASES),
        required(
            "suggested_action",
            &["acao_sugerida", "ação_sugerida", "acao", "ação", "action"],
        ),
        required("status", &["situacao", "situação"]),
        optional("comment", &["comentario", "comentário", "observacao", "observação"]),
    ],
};

pub const COLLECTIONS: TableSchema = TableSchema {
    columns: &[
        required("collection", &["colecao", "coleção", "nome", "name"]),
        optional("active", &["ativa", "ativo", "atual", "current"]),
    ],
};

/// Trims, lower-cases and joins inner whitespace with `_`
///
/// # Example
/// ```
/// use diario_bordo_api::infrastructure::spreadsheet::schema::normalize_header;
///
/// assert_eq!(normalize_header("  Meta   Clientes "), "meta_clientes");
/// ```
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Field name to column index, resolved once per load
#[derive(Debug, Clone, Default)]
pub struct ResolvedColumns {
    indices: HashMap<&'static str, usize>,
    headers: Vec<String>,
}

impl ResolvedColumns {
    pub fn index(&self, field: &str) -> Option<usize> {
        self.indices.get(field).copied()
    }

    /// Header text as written in the sheet for a resolved field
    pub fn header(&self, field: &str) -> Option<&str> {
        self.index(field)
            .and_then(|i| self.headers.get(i))
            .map(String::as_str)
    }
}

impl TableSchema {
    /// Matches the header row against the schema
    ///
    /// The first header that matches a field wins. Fails with
    /// `MissingColumns` naming every unresolved required field.
    pub fn resolve(&self, file: &str, headers: &[String]) -> DiarioResult<ResolvedColumns> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let mut indices = HashMap::new();
        let mut missing = Vec::new();

        for spec in self.columns {
            let found = normalized.iter().position(|header| {
                header == spec.field
                    || spec
                        .aliases
                        .iter()
                        .any(|alias| *header == normalize_header(alias))
            });

            match found {
                Some(index) => {
                    indices.insert(spec.field, index);
                }
                None if spec.required => missing.push(spec.field.to_string()),
                None => {}
            }
        }

        if !missing.is_empty() {
            return Err(DiarioError::MissingColumns {
                file: file.to_string(),
                missing,
                found: headers.iter().map(|h| h.trim().to_string()).collect(),
            });
        }

        Ok(ResolvedColumns {
            indices,
            headers: headers.to_vec(),
        })
    }

    /// Canonical field names, in schema order
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|spec| spec.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn padded_mixed_case_header_resolves() {
        let resolved = USERS
            .resolve("usuarios.xlsx", &headers(&[" Email ", "Senha", "Representante"]))
            .unwrap();

        assert_eq!(resolved.index("email"), Some(0));
        assert_eq!(resolved.index("password"), Some(1));
        assert_eq!(resolved.index("representative_id"), Some(2));
        assert_eq!(resolved.index("display_name"), None);
        assert_eq!(resolved.header("email"), Some(" Email "));
    }

    #[test]
    fn aliases_with_inner_spaces() {
        let resolved = GOALS
            .resolve(
                "metas_colecao.xlsx",
                &headers(&["REP", "Coleção", "Meta  Valor", "Meta Clientes"]),
            )
            .unwrap();

        assert_eq!(resolved.index("sales_target_amount"), Some(2));
        assert_eq!(resolved.index("client_count_target"), Some(3));
    }

    #[test]
    fn missing_required_columns_are_listed() {
        let err = USERS
            .resolve("usuarios.xlsx", &headers(&["login", "nome"]))
            .unwrap_err();

        match err {
            DiarioError::MissingColumns {
                file,
                missing,
                found,
            } => {
                assert_eq!(file, "usuarios.xlsx");
                assert_eq!(missing, vec!["password", "representative_id"]);
                assert_eq!(found, vec!["login", "nome"]);
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn first_matching_header_wins() {
        let resolved = SALES
            .resolve(
                "diario_bordo.xlsx",
                &headers(&["rep", "cliente", "colecao", "valor", "vendas"]),
            )
            .unwrap();

        assert_eq!(resolved.index("amount"), Some(3));
    }

    #[test]
    fn normalize_header_collapses_whitespace() {
        assert_eq!(normalize_header("\tData  Venda\n"), "data_venda");
        assert_eq!(normalize_header("E-mail"), "e-mail");
    }
}
