//! Conditions, expressions and the pieces they are built from
//!
//! An expression opens one of six ways. A leading `(` is a grouped
//! sub-condition; otherwise an evaluable comes first and the single token
//! after it picks the alternative. An identifier (or `COUNT`/`LEFT`/`RIGHT`)
//! directly followed by `(` is a function call, anything else is a field.

use super::cursor::{ParseResult, Parser};
use crate::ast::value::unquote;
use crate::ast::{
    ComparisonOperator, Condition, Evaluable, Expression, Field, FunctionArgs, FunctionCall,
    LogicalOperator, SelectItem, Value,
};
use crate::diagnostics::Diagnostic;
use crate::lexer::{Token, TokenKind, COMPARISON_KINDS, ENTITY_KINDS, VALUE_KINDS};

/// Identifier plus every entity keyword
fn field_start() -> Vec<TokenKind> {
    let mut kinds = vec![TokenKind::Identifier];
    kinds.extend_from_slice(&ENTITY_KINDS);
    kinds
}

fn select_item_start() -> Vec<TokenKind> {
    let mut kinds = field_start();
    kinds.extend_from_slice(&VALUE_KINDS);
    kinds
}

fn comparison_operator(kind: TokenKind) -> Option<ComparisonOperator> {
    let operator = match kind {
        TokenKind::Eq => ComparisonOperator::Eq,
        TokenKind::Neq => ComparisonOperator::Neq,
        TokenKind::Gt => ComparisonOperator::Gt,
        TokenKind::Gte => ComparisonOperator::Gte,
        TokenKind::Lt => ComparisonOperator::Lt,
        TokenKind::Lte => ComparisonOperator::Lte,
        TokenKind::Like => ComparisonOperator::Like,
        _ => return None,
    };
    Some(operator)
}

/// Parse an integer lexeme where only non-negative 64-bit values make sense.
pub(super) fn unsigned(token: &Token<'_>) -> ParseResult<u64> {
    token.lexeme.parse::<u64>().map_err(|_| {
        if token.lexeme.starts_with('-') {
            Diagnostic::invalid_number(token, "must not be negative")
        } else {
            Diagnostic::invalid_number(token, "does not fit in an unsigned 64-bit integer")
        }
    })
}

impl<'a, I> Parser<'a, I>
where
    I: Iterator<Item = ParseResult<Token<'a>>>,
{
    /// `expression ((AND | OR) expression)*`, kept as a flat chain
    pub(super) fn parse_condition(&mut self) -> ParseResult<Condition> {
        let mut condition = Condition::single(self.parse_expression()?);
        loop {
            let operator = if self.eat(TokenKind::And)?.is_some() {
                LogicalOperator::And
            } else if self.eat(TokenKind::Or)?.is_some() {
                LogicalOperator::Or
            } else {
                break;
            };
            let expression = self.parse_expression()?;
            condition = condition.then(operator, expression);
        }
        Ok(condition)
    }

    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        if let Some(open) = self.eat(TokenKind::LParen)? {
            let inner = self.nested(open, |parser| {
                let inner = parser.parse_condition()?;
                parser.expect(TokenKind::RParen)?;
                Ok(inner)
            })?;
            return Ok(Expression::Group(Box::new(inner)));
        }

        let left = self.parse_evaluable()?;
        let token = self.peek()?;
        if let Some(operator) = comparison_operator(token.kind) {
            self.bump()?;
            let value = self.parse_value()?;
            return Ok(Expression::Comparison {
                left,
                operator,
                value,
            });
        }

        match token.kind {
            TokenKind::In => {
                self.bump()?;
                self.expect(TokenKind::LParen)?;
                let mut values = vec![self.parse_value()?];
                while self.eat(TokenKind::Comma)?.is_some() {
                    values.push(self.parse_value()?);
                }
                self.expect(TokenKind::RParen)?;
                Ok(Expression::In { left, values })
            }
            TokenKind::Contains => {
                self.bump()?;
                let pattern = self.parse_pattern()?;
                Ok(Expression::Contains { left, pattern })
            }
            TokenKind::Between => {
                self.bump()?;
                let low = self.parse_value()?;
                self.expect(TokenKind::And)?;
                let high = self.parse_value()?;
                Ok(Expression::Between { left, low, high })
            }
            TokenKind::Is => {
                self.bump()?;
                let negated = self.eat(TokenKind::Not)?.is_some();
                self.expect(TokenKind::Null)?;
                Ok(Expression::IsNull { left, negated })
            }
            _ => {
                let mut operators = COMPARISON_KINDS.to_vec();
                operators.extend_from_slice(&[
                    TokenKind::In,
                    TokenKind::Contains,
                    TokenKind::Between,
                    TokenKind::Is,
                ]);
                Err(self.error(&operators))
            }
        }
    }

    /// The quoted text after CONTAINS. A timestamp-shaped string is still
    /// just text here.
    fn parse_pattern(&mut self) -> ParseResult<String> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::String | TokenKind::Timestamp => {
                self.bump()?;
                Ok(unquote(token.lexeme).to_string())
            }
            _ => Err(self.error(&[TokenKind::String])),
        }
    }

    /// True when the next two tokens are a callable name and `(`.
    pub(super) fn at_function_call(&mut self) -> ParseResult<bool> {
        if !self.peek_kind()?.is_callable() {
            return Ok(false);
        }
        Ok(self.peek_nth(1)?.kind == TokenKind::LParen)
    }

    pub(super) fn parse_evaluable(&mut self) -> ParseResult<Evaluable> {
        if self.at_function_call()? {
            return Ok(Evaluable::Function(self.parse_function_call()?));
        }
        let kind = self.peek_kind()?;
        if kind == TokenKind::Identifier || kind.is_entity() {
            return Ok(Evaluable::Field(self.parse_field()?));
        }
        Err(self.error(&field_start()))
    }

    /// `ID | entity '.' ID ['.' ID]`
    pub(super) fn parse_field(&mut self) -> ParseResult<Field> {
        let token = self.peek()?;
        if token.kind == TokenKind::Identifier {
            self.bump()?;
            return Ok(Field::new(token.lexeme));
        }
        let Some(entity) = token.kind.entity() else {
            return Err(self.error(&field_start()));
        };

        self.bump()?;
        self.expect(TokenKind::Dot)?;
        let name = self.expect(TokenKind::Identifier)?;
        let mut field = Field::qualified(entity, name.lexeme);
        if self.eat(TokenKind::Dot)?.is_some() {
            let attribute = self.expect(TokenKind::Identifier)?;
            field = field.with_attribute(attribute.lexeme);
        }
        Ok(field)
    }

    /// `name '(' ['*' | selectItem (',' selectItem)*] ')'`
    ///
    /// Callers check [`Self::at_function_call`] first.
    pub(super) fn parse_function_call(&mut self) -> ParseResult<FunctionCall> {
        let name = self.bump()?;
        let open = self.expect(TokenKind::LParen)?;
        let args = self.nested(open, |parser| {
            let args = if parser.eat(TokenKind::Star)?.is_some() {
                FunctionArgs::Star
            } else if parser.at(TokenKind::RParen)? {
                FunctionArgs::Empty
            } else {
                let mut items = vec![parser.parse_select_item()?];
                while parser.eat(TokenKind::Comma)?.is_some() {
                    items.push(parser.parse_select_item()?);
                }
                FunctionArgs::List(items)
            };
            parser.expect(TokenKind::RParen)?;
            Ok(args)
        })?;
        Ok(FunctionCall::new(name.lexeme, args))
    }

    pub(super) fn parse_select_item(&mut self) -> ParseResult<SelectItem> {
        if self.at_function_call()? {
            return Ok(SelectItem::Function(self.parse_function_call()?));
        }
        let kind = self.peek_kind()?;
        if kind == TokenKind::Identifier || kind.is_entity() {
            Ok(SelectItem::Field(self.parse_field()?))
        } else if kind.is_value_start() {
            Ok(SelectItem::Value(self.parse_value()?))
        } else {
            Err(self.error(&select_item_start()))
        }
    }

    pub(super) fn parse_value(&mut self) -> ParseResult<Value> {
        let token = self.peek()?;
        let value = match token.kind {
            TokenKind::String => Value::String(unquote(token.lexeme).to_string()),
            TokenKind::Timestamp => Value::Timestamp(unquote(token.lexeme).to_string()),
            TokenKind::Integer => Value::Integer(token.lexeme.parse::<i64>().map_err(|_| {
                Diagnostic::invalid_number(&token, "does not fit in a signed 64-bit integer")
            })?),
            TokenKind::Float => Value::Float(
                token
                    .lexeme
                    .parse::<f64>()
                    .map_err(|_| Diagnostic::invalid_number(&token, "not a valid float"))?,
            ),
            TokenKind::Boolean => Value::Boolean(token.lexeme.eq_ignore_ascii_case("true")),
            TokenKind::IpAddress => Value::IpAddress(token.lexeme.to_string()),
            TokenKind::MacAddress => Value::MacAddress(token.lexeme.to_string()),
            TokenKind::Today => Value::Today,
            TokenKind::Yesterday => Value::Yesterday,
            _ => return Err(self.error(&VALUE_KINDS)),
        };
        self.bump()?;
        Ok(value)
    }

    /// An `INTEGER` token read as a non-negative count
    pub(super) fn parse_unsigned(&mut self) -> ParseResult<u64> {
        let token = self.expect(TokenKind::Integer)?;
        unsigned(&token)
    }
}
