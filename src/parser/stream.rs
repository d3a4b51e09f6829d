//! STREAM statements
//!
//! `STREAM [selectList] FROM dataSource joinPart* [WHERE ..] [GROUP BY ..]
//! [HAVING ..] [ORDER BY ..] [LIMIT n] [EMIT ..]`
//!
//! The `FROM` here names a data source, unlike the time clause of the other
//! statements; the two never meet because the statement keyword decides
//! which rule runs.

use super::cursor::{ParseResult, Parser};
use crate::ast::{
    DataSource, Duration, DurationOrField, DurationUnit, EmitPolicy, Field, JoinPart, JoinType,
    SelectElement, SelectList, SourceName, StreamSourcePrimary, StreamStatement, WindowKind,
    WindowSpec,
};
use crate::lexer::{Token, TokenKind, DURATION_UNIT_KINDS, ENTITY_KINDS};

fn source_name_start() -> Vec<TokenKind> {
    let mut kinds = vec![TokenKind::Identifier];
    kinds.extend_from_slice(&ENTITY_KINDS);
    kinds
}

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = ParseResult<Token<'a>>>,
{
    pub(super) fn parse_stream(&mut self) -> ParseResult<StreamStatement> {
        self.expect(TokenKind::Stream)?;
        let select = if self.at(TokenKind::From)? {
            None
        } else {
            Some(self.parse_select_list()?)
        };
        self.expect(TokenKind::From)?;
        let source = self.parse_data_source()?;

        let mut joins = Vec::new();
        while self
            .at_any(&[
                TokenKind::Join,
                TokenKind::Left,
                TokenKind::Right,
                TokenKind::Inner,
            ])?
            .is_some()
        {
            joins.push(self.parse_join()?);
        }

        let where_clause = self.parse_where()?;
        let group_by = self.parse_group_by()?;
        let having = if self.eat(TokenKind::Having)?.is_some() {
            Some(self.parse_condition()?)
        } else {
            None
        };
        let order_by = self.parse_order_by()?;
        let limit = self.parse_limit()?;
        let emit = if self.eat(TokenKind::Emit)?.is_some() {
            Some(self.parse_emit()?)
        } else {
            None
        };

        Ok(StreamStatement {
            select,
            source,
            joins,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
            emit,
        })
    }

    /// `'*' | selectItem [AS ID] (',' selectItem [AS ID])*`
    fn parse_select_list(&mut self) -> ParseResult<SelectList> {
        if self.eat(TokenKind::Star)?.is_some() {
            return Ok(SelectList::All);
        }
        let mut elements = vec![self.parse_select_element()?];
        while self.eat(TokenKind::Comma)?.is_some() {
            elements.push(self.parse_select_element()?);
        }
        Ok(SelectList::Items(elements))
    }

    fn parse_select_element(&mut self) -> ParseResult<SelectElement> {
        let item = self.parse_select_item()?;
        let alias = self.parse_alias()?;
        Ok(SelectElement { item, alias })
    }

    fn parse_alias(&mut self) -> ParseResult<Option<String>> {
        if self.eat(TokenKind::As)?.is_none() {
            return Ok(None);
        }
        let alias = self.expect(TokenKind::Identifier)?;
        Ok(Some(alias.lexeme.to_string()))
    }

    fn parse_data_source(&mut self) -> ParseResult<DataSource> {
        let primary = match self.peek_kind()? {
            TokenKind::Table => {
                self.bump()?;
                self.expect(TokenKind::LParen)?;
                let name = self.parse_source_name()?;
                self.expect(TokenKind::RParen)?;
                StreamSourcePrimary::Table(name)
            }
            TokenKind::Tumble | TokenKind::Hop => StreamSourcePrimary::Window(self.parse_window()?),
            kind if kind == TokenKind::Identifier || kind.is_entity() => {
                StreamSourcePrimary::Source(self.parse_source_name()?)
            }
            _ => {
                let mut expected = vec![TokenKind::Table, TokenKind::Tumble, TokenKind::Hop];
                expected.extend(source_name_start());
                return Err(self.error(&expected));
            }
        };
        let alias = self.parse_alias()?;
        Ok(DataSource { primary, alias })
    }

    fn parse_source_name(&mut self) -> ParseResult<SourceName> {
        let token = self.peek()?;
        let name = if let Some(entity) = token.kind.entity() {
            SourceName::Entity(entity)
        } else if token.kind == TokenKind::Identifier {
            SourceName::Named(token.lexeme.to_string())
        } else {
            return Err(self.error(&source_name_start()));
        };
        self.bump()?;
        Ok(name)
    }

    /// `(TUMBLE | HOP) '(' source ',' field ',' size [',' advance] ')'`
    fn parse_window(&mut self) -> ParseResult<WindowSpec> {
        let kind = match self.bump()?.kind {
            TokenKind::Hop => WindowKind::Hop,
            _ => WindowKind::Tumble,
        };
        self.expect(TokenKind::LParen)?;
        let source = self.parse_source_name()?;
        self.expect(TokenKind::Comma)?;
        let time_field = self.parse_field()?;
        self.expect(TokenKind::Comma)?;
        let size = self.parse_duration_or_field()?;
        let advance = if self.eat(TokenKind::Comma)?.is_some() {
            Some(self.parse_duration_or_field()?)
        } else {
            None
        };
        self.expect(TokenKind::RParen)?;
        Ok(WindowSpec {
            kind,
            source,
            time_field,
            size,
            advance,
        })
    }

    fn parse_duration_or_field(&mut self) -> ParseResult<DurationOrField> {
        if self.at(TokenKind::Integer)? {
            Ok(DurationOrField::Duration(self.parse_duration()?))
        } else {
            Ok(DurationOrField::Field(self.parse_field()?))
        }
    }

    /// `INTEGER ('s' | 'm' | 'h' | 'd')`
    fn parse_duration(&mut self) -> ParseResult<Duration> {
        let amount = self.parse_unsigned()?;
        let unit = match self.peek_kind()? {
            TokenKind::SecondsUnit => DurationUnit::Seconds,
            TokenKind::MinutesUnit => DurationUnit::Minutes,
            TokenKind::HoursUnit => DurationUnit::Hours,
            TokenKind::DaysUnit => DurationUnit::Days,
            _ => return Err(self.error(&DURATION_UNIT_KINDS)),
        };
        self.bump()?;
        Ok(Duration::new(amount, unit))
    }

    /// `[LEFT | RIGHT | INNER] JOIN dataSource ON condition`
    fn parse_join(&mut self) -> ParseResult<JoinPart> {
        let join_type = if self.eat(TokenKind::Left)?.is_some() {
            Some(JoinType::Left)
        } else if self.eat(TokenKind::Right)?.is_some() {
            Some(JoinType::Right)
        } else if self.eat(TokenKind::Inner)?.is_some() {
            Some(JoinType::Inner)
        } else {
            None
        };
        self.expect(TokenKind::Join)?;
        let source = self.parse_data_source()?;
        self.expect(TokenKind::On)?;
        let on = self.parse_condition()?;
        Ok(JoinPart {
            join_type,
            source,
            on,
        })
    }

    /// `[GROUP BY field (',' field)*]`
    fn parse_group_by(&mut self) -> ParseResult<Vec<Field>> {
        if self.eat(TokenKind::Group)?.is_none() {
            return Ok(Vec::new());
        }
        self.expect(TokenKind::By)?;
        let mut fields = vec![self.parse_field()?];
        while self.eat(TokenKind::Comma)?.is_some() {
            fields.push(self.parse_field()?);
        }
        Ok(fields)
    }

    /// Everything after `EMIT`
    fn parse_emit(&mut self) -> ParseResult<EmitPolicy> {
        if self.eat(TokenKind::After)?.is_some() {
            self.expect(TokenKind::Window)?;
            self.expect(TokenKind::Close)?;
            let delay = if self.eat(TokenKind::With)?.is_some() {
                self.expect(TokenKind::Delay)?;
                Some(self.parse_duration()?)
            } else {
                None
            };
            return Ok(EmitPolicy::AfterWindowClose { delay });
        }
        if self.eat(TokenKind::Periodic)?.is_some() {
            let interval = self.parse_duration()?;
            return Ok(EmitPolicy::Periodic { interval });
        }
        Err(self.error(&[]))
    }
}
