//! SHOW, FIND and COUNT statements plus the clauses they share
//!
//! Each statement is a fixed sequence of optional clauses. A clause is
//! entered only when its leading keyword is present; a missing keyword is
//! not an error, it only widens the expected set reported if the statement
//! is followed by something else.

use super::cursor::{ParseResult, Parser};
use crate::ast::{
    Condition, CountStatement, Entity, FindStatement, OrderByItem, Query, ShowStatement,
    ShowTarget, SortDirection, TimeSpec, TimeUnit,
};
use crate::lexer::{Token, TokenKind, ENTITY_KINDS, STATEMENT_KINDS, TIME_UNIT_KINDS};

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = ParseResult<Token<'a>>>,
{
    /// Parse one complete statement followed by end of input.
    pub fn parse_query(&mut self) -> ParseResult<Query> {
        let query = match self.peek_kind()? {
            TokenKind::Show => Query::Show(self.parse_show()?),
            TokenKind::Find => Query::Find(self.parse_find()?),
            TokenKind::Count => Query::Count(self.parse_count()?),
            TokenKind::Stream => Query::Stream(self.parse_stream()?),
            _ => return Err(self.error(&STATEMENT_KINDS)),
        };
        self.expect_end()?;
        Ok(query)
    }

    /// `SHOW (entity | functionCall FROM entity) [FROM timeSpec] ...`
    ///
    /// With an aggregate target two FROMs may follow each other; the first
    /// names the entity, the second opens the time clause.
    fn parse_show(&mut self) -> ParseResult<ShowStatement> {
        self.expect(TokenKind::Show)?;
        let target = if self.at_function_call()? {
            let call = self.parse_function_call()?;
            self.expect(TokenKind::From)?;
            let entity = self.parse_entity()?;
            ShowTarget::Aggregate { call, entity }
        } else {
            ShowTarget::Entity(self.parse_entity()?)
        };

        let time_spec = self.parse_time_clause()?;
        let where_clause = self.parse_where()?;
        let order_by = self.parse_order_by()?;
        let limit = self.parse_limit()?;
        let latest = self.eat(TokenKind::Latest)?.is_some();
        Ok(ShowStatement {
            target,
            time_spec,
            where_clause,
            order_by,
            limit,
            latest,
        })
    }

    fn parse_find(&mut self) -> ParseResult<FindStatement> {
        self.expect(TokenKind::Find)?;
        let entity = self.parse_entity()?;
        let time_spec = self.parse_time_clause()?;
        let where_clause = self.parse_where()?;
        let order_by = self.parse_order_by()?;
        let limit = self.parse_limit()?;
        let latest = self.eat(TokenKind::Latest)?.is_some();
        Ok(FindStatement {
            entity,
            time_spec,
            where_clause,
            order_by,
            limit,
            latest,
        })
    }

    fn parse_count(&mut self) -> ParseResult<CountStatement> {
        self.expect(TokenKind::Count)?;
        let entity = self.parse_entity()?;
        let time_spec = self.parse_time_clause()?;
        let where_clause = self.parse_where()?;
        Ok(CountStatement {
            entity,
            time_spec,
            where_clause,
        })
    }

    pub(super) fn parse_entity(&mut self) -> ParseResult<Entity> {
        match self.peek_kind()?.entity() {
            Some(entity) => {
                self.bump()?;
                Ok(entity)
            }
            None => Err(self.error(&ENTITY_KINDS)),
        }
    }

    /// `[FROM timeSpec]`
    fn parse_time_clause(&mut self) -> ParseResult<Option<TimeSpec>> {
        if self.eat(TokenKind::From)?.is_none() {
            return Ok(None);
        }
        self.parse_time_spec().map(Some)
    }

    fn parse_time_spec(&mut self) -> ParseResult<TimeSpec> {
        if self.eat(TokenKind::Today)?.is_some() {
            return Ok(TimeSpec::Today);
        }
        if self.eat(TokenKind::Yesterday)?.is_some() {
            return Ok(TimeSpec::Yesterday);
        }
        if self.eat(TokenKind::Last)?.is_some() {
            let amount = self.parse_unsigned()?;
            let unit = self.parse_time_unit()?;
            return Ok(TimeSpec::Last { amount, unit });
        }
        if self.eat(TokenKind::Between)?.is_some() {
            let start = self.parse_value()?;
            self.expect(TokenKind::And)?;
            let end = self.parse_value()?;
            return Ok(TimeSpec::Between(start, end));
        }
        Err(self.error(&[]))
    }

    fn parse_time_unit(&mut self) -> ParseResult<TimeUnit> {
        let unit = match self.peek_kind()? {
            TokenKind::Minutes => TimeUnit::Minutes,
            TokenKind::Hours => TimeUnit::Hours,
            TokenKind::Days => TimeUnit::Days,
            TokenKind::Weeks => TimeUnit::Weeks,
            TokenKind::Months => TimeUnit::Months,
            _ => return Err(self.error(&TIME_UNIT_KINDS)),
        };
        self.bump()?;
        Ok(unit)
    }

    /// `[WHERE condition]`
    pub(super) fn parse_where(&mut self) -> ParseResult<Option<Condition>> {
        if self.eat(TokenKind::Where)?.is_none() {
            return Ok(None);
        }
        self.parse_condition().map(Some)
    }

    /// `[ORDER BY field [ASC|DESC] (',' field [ASC|DESC])*]`
    pub(super) fn parse_order_by(&mut self) -> ParseResult<Vec<OrderByItem>> {
        if self.eat(TokenKind::Order)?.is_none() {
            return Ok(Vec::new());
        }
        self.expect(TokenKind::By)?;
        let mut items = vec![self.parse_order_item()?];
        while self.eat(TokenKind::Comma)?.is_some() {
            items.push(self.parse_order_item()?);
        }
        Ok(items)
    }

    fn parse_order_item(&mut self) -> ParseResult<OrderByItem> {
        let field = self.parse_field()?;
        let direction = if self.eat(TokenKind::Desc)?.is_some() {
            SortDirection::Desc
        } else {
            self.eat(TokenKind::Asc)?;
            SortDirection::Asc
        };
        Ok(OrderByItem { field, direction })
    }

    /// `[LIMIT INTEGER]`
    pub(super) fn parse_limit(&mut self) -> ParseResult<Option<u64>> {
        if self.eat(TokenKind::Limit)?.is_none() {
            return Ok(None);
        }
        self.parse_unsigned().map(Some)
    }
}
