use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, Select,
    sea_query::{Condition, Expr, Func, LikeExpr, SimpleExpr},
};

/// Escape `LIKE` metacharacters so a user term only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `LOWER(table.col) LIKE '%term%'`, i.e. a case-insensitive substring match.
pub fn icontains<C>(column: C, term: &str) -> SimpleExpr
where
    C: ColumnTrait,
{
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column.as_column_ref())))
        .like(LikeExpr::new(pattern).escape('\\'))
}

pub trait SearchAny {
    /// Keep rows where every term matches at least one of `columns`.
    fn search_any<C>(self, columns: &[C], terms: &[String]) -> Self
    where
        C: ColumnTrait;
}

impl<E> SearchAny for Select<E>
where
    E: EntityTrait,
{
    fn search_any<C>(mut self, columns: &[C], terms: &[String]) -> Self
    where
        C: ColumnTrait,
    {
        for term in terms {
            let any = columns
                .iter()
                .fold(Condition::any(), |cond, column| cond.add(icontains(*column, term)));
            self = self.filter(any);
        }
        self
    }
}
