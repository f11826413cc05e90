//! GML export and import for governance graphs.
//!
//! The writer emits the GML dialect the downstream analysis tooling reads:
//! a `graph [ ... ]` block with an optional `directed 1` flag, `node` blocks
//! carrying `hash` plus either `reputation` or `member`/`stakes`, and `edge`
//! blocks carrying `weight`. The parser accepts the same dialect back, so
//! node attributes and edge weights round-trip losslessly.

use std::io;

use govnet_core::{
    EdgeOrientation, GovernanceGraph, GraphError, Node, NodeAttributes, WeightedEdge,
};
use thiserror::Error;

/// Errors raised while parsing a GML document.
#[derive(Debug, Error)]
pub enum GmlError {
    /// The document ended before the graph block was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token `{token}`")]
    UnexpectedToken {
        /// Rendering of the offending token.
        token: String,
    },
    /// A field held a value outside its domain.
    #[error("field `{field}` has an invalid value")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A node block was missing `id`, `hash`, or its attribute fields.
    #[error("node block is missing required fields")]
    IncompleteNode,
    /// An edge block was missing `source`, `target`, or `weight`.
    #[error("edge block is missing required fields")]
    IncompleteEdge,
    /// The parsed nodes and edges did not assemble into a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Writes `graph` as GML.
///
/// # Errors
/// Returns any [`io::Error`] raised by the writer.
pub fn write_gml(graph: &GovernanceGraph, mut writer: impl io::Write) -> io::Result<()> {
    writeln!(writer, "graph [")?;
    if graph.is_directed() {
        writeln!(writer, "  directed 1")?;
    }
    for node in graph.nodes() {
        writeln!(writer, "  node [")?;
        writeln!(writer, "    id {}", node.index())?;
        writeln!(writer, "    label \"{}\"", node.index())?;
        writeln!(writer, "    hash \"{}\"", escape(node.address()))?;
        match node.attributes() {
            NodeAttributes::Reputation { reputation } => {
                writeln!(writer, "    reputation {reputation}")?;
            }
            NodeAttributes::Staking { member, stakes } => {
                writeln!(writer, "    member {}", u8::from(*member))?;
                writeln!(writer, "    stakes {stakes}")?;
            }
        }
        writeln!(writer, "  ]")?;
    }
    for edge in graph.edges() {
        writeln!(writer, "  edge [")?;
        writeln!(writer, "    source {}", edge.from())?;
        writeln!(writer, "    target {}", edge.to())?;
        writeln!(writer, "    weight {}", edge.weight())?;
        writeln!(writer, "  ]")?;
    }
    writeln!(writer, "]")
}

/// Parses a GML document back into a [`GovernanceGraph`].
///
/// Unknown scalar fields are skipped, so documents annotated by other tools
/// still load. Nodes may appear in any order; they are sorted by `id`
/// before assembly.
///
/// # Errors
/// Returns [`GmlError`] for malformed documents and propagates assembly
/// failures for structurally invalid graphs.
pub fn parse_gml(input: &str) -> Result<GovernanceGraph, GmlError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        cursor: 0,
    };
    parser.expect_ident("graph")?;
    parser.expect_open()?;

    let mut orientation = EdgeOrientation::Undirected;
    let mut nodes: Vec<Node> = Vec::new();
    let mut edges: Vec<WeightedEdge> = Vec::new();
    loop {
        match parser.next()? {
            Token::Close => break,
            Token::Ident(key) if key == "directed" => {
                if parser.int("directed")? == 1 {
                    orientation = EdgeOrientation::Directed;
                }
            }
            Token::Ident(key) if key == "node" => nodes.push(parser.node_block()?),
            Token::Ident(key) if key == "edge" => edges.push(parser.edge_block()?),
            Token::Ident(_) => parser.skip_value()?,
            other => {
                return Err(GmlError::UnexpectedToken {
                    token: other.render(),
                });
            }
        }
    }

    nodes.sort_by_key(Node::index);
    Ok(GovernanceGraph::try_new(nodes, edges, orientation)?)
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    Open,
    Close,
}

impl Token {
    fn render(&self) -> String {
        match self {
            Self::Ident(value) | Self::Str(value) => value.clone(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Open => "[".to_owned(),
            Self::Close => "]".to_owned(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, GmlError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '[' {
            chars.next();
            tokens.push(Token::Open);
        } else if c == ']' {
            chars.next();
            tokens.push(Token::Close);
        } else if c == '"' {
            chars.next();
            tokens.push(Token::Str(read_string(&mut chars)?));
        } else if c.is_ascii_alphabetic() || c == '_' {
            let mut ident = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    ident.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Ident(ident));
        } else if c == '-' || c == '+' || c.is_ascii_digit() {
            let mut literal = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                    literal.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(parse_number(&literal)?);
        } else {
            return Err(GmlError::UnexpectedToken {
                token: c.to_string(),
            });
        }
    }
    Ok(tokens)
}

fn read_string(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<String, GmlError> {
    let mut value = String::new();
    loop {
        match chars.next() {
            None => return Err(GmlError::UnexpectedEof),
            Some('"') => return Ok(value),
            Some('\\') => match chars.next() {
                Some(escaped @ ('"' | '\\')) => value.push(escaped),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                }
                None => return Err(GmlError::UnexpectedEof),
            },
            Some(other) => value.push(other),
        }
    }
}

fn parse_number(literal: &str) -> Result<Token, GmlError> {
    if literal.contains(['.', 'e', 'E']) {
        literal
            .parse::<f64>()
            .map(Token::Float)
            .map_err(|_| GmlError::UnexpectedToken {
                token: literal.to_owned(),
            })
    } else {
        literal
            .parse::<i64>()
            .map(Token::Int)
            .map_err(|_| GmlError::UnexpectedToken {
                token: literal.to_owned(),
            })
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

#[derive(Default)]
struct NodeFields {
    id: Option<usize>,
    hash: Option<String>,
    reputation: Option<f64>,
    member: Option<bool>,
    stakes: Option<u64>,
}

#[derive(Default)]
struct EdgeFields {
    source: Option<usize>,
    target: Option<usize>,
    weight: Option<u64>,
}

impl Parser<'_> {
    fn next(&mut self) -> Result<Token, GmlError> {
        let token = self
            .tokens
            .get(self.cursor)
            .cloned()
            .ok_or(GmlError::UnexpectedEof)?;
        self.cursor += 1;
        Ok(token)
    }

    fn expect_ident(&mut self, expected: &str) -> Result<(), GmlError> {
        match self.next()? {
            Token::Ident(value) if value == expected => Ok(()),
            other => Err(GmlError::UnexpectedToken {
                token: other.render(),
            }),
        }
    }

    fn expect_open(&mut self) -> Result<(), GmlError> {
        match self.next()? {
            Token::Open => Ok(()),
            other => Err(GmlError::UnexpectedToken {
                token: other.render(),
            }),
        }
    }

    fn int(&mut self, field: &'static str) -> Result<i64, GmlError> {
        match self.next()? {
            Token::Int(value) => Ok(value),
            _ => Err(GmlError::InvalidValue { field }),
        }
    }

    fn unsigned(&mut self, field: &'static str) -> Result<u64, GmlError> {
        u64::try_from(self.int(field)?).map_err(|_| GmlError::InvalidValue { field })
    }

    fn index(&mut self, field: &'static str) -> Result<usize, GmlError> {
        usize::try_from(self.int(field)?).map_err(|_| GmlError::InvalidValue { field })
    }

    fn float(&mut self, field: &'static str) -> Result<f64, GmlError> {
        match self.next()? {
            Token::Float(value) => Ok(value),
            #[expect(
                clippy::cast_precision_loss,
                reason = "whole-number attribute values fit f64 exactly in practice"
            )]
            Token::Int(value) => Ok(value as f64),
            _ => Err(GmlError::InvalidValue { field }),
        }
    }

    fn string(&mut self, field: &'static str) -> Result<String, GmlError> {
        match self.next()? {
            Token::Str(value) => Ok(value),
            _ => Err(GmlError::InvalidValue { field }),
        }
    }

    /// Skips the value of an unknown key: one scalar or a balanced block.
    fn skip_value(&mut self) -> Result<(), GmlError> {
        match self.next()? {
            Token::Open => {
                let mut depth = 1_usize;
                while depth > 0 {
                    match self.next()? {
                        Token::Open => depth += 1,
                        Token::Close => depth -= 1,
                        _ => {}
                    }
                }
                Ok(())
            }
            Token::Close => Err(GmlError::UnexpectedToken {
                token: "]".to_owned(),
            }),
            _ => Ok(()),
        }
    }

    fn node_block(&mut self) -> Result<Node, GmlError> {
        self.expect_open()?;
        let mut fields = NodeFields::default();
        loop {
            match self.next()? {
                Token::Close => break,
                Token::Ident(key) => match key.as_str() {
                    "id" => fields.id = Some(self.index("id")?),
                    "hash" => fields.hash = Some(self.string("hash")?),
                    "reputation" => fields.reputation = Some(self.float("reputation")?),
                    "member" => fields.member = Some(self.int("member")? != 0),
                    "stakes" => fields.stakes = Some(self.unsigned("stakes")?),
                    _ => self.skip_value()?,
                },
                other => {
                    return Err(GmlError::UnexpectedToken {
                        token: other.render(),
                    });
                }
            }
        }
        fields.build()
    }

    fn edge_block(&mut self) -> Result<WeightedEdge, GmlError> {
        self.expect_open()?;
        let mut fields = EdgeFields::default();
        loop {
            match self.next()? {
                Token::Close => break,
                Token::Ident(key) => match key.as_str() {
                    "source" => fields.source = Some(self.index("source")?),
                    "target" => fields.target = Some(self.index("target")?),
                    "weight" => fields.weight = Some(self.unsigned("weight")?),
                    _ => self.skip_value()?,
                },
                other => {
                    return Err(GmlError::UnexpectedToken {
                        token: other.render(),
                    });
                }
            }
        }
        let (Some(source), Some(target), Some(weight)) =
            (fields.source, fields.target, fields.weight)
        else {
            return Err(GmlError::IncompleteEdge);
        };
        Ok(WeightedEdge::new(source, target, weight))
    }
}

impl NodeFields {
    fn build(self) -> Result<Node, GmlError> {
        let (Some(id), Some(hash)) = (self.id, self.hash) else {
            return Err(GmlError::IncompleteNode);
        };
        let attributes = match (self.reputation, self.member, self.stakes) {
            (Some(reputation), None, None) => NodeAttributes::Reputation { reputation },
            (None, Some(member), Some(stakes)) => NodeAttributes::Staking { member, stakes },
            _ => return Err(GmlError::IncompleteNode),
        };
        Ok(Node::new(id, hash, attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reputation_graph() -> GovernanceGraph {
        let nodes = vec![
            Node::new(0, "0xa", NodeAttributes::Reputation { reputation: 0.0 }),
            Node::new(1, "0xb\"quoted\"", NodeAttributes::Reputation { reputation: 62.5 }),
            Node::new(2, "0xc", NodeAttributes::Reputation { reputation: 100.0 }),
        ];
        let edges = vec![WeightedEdge::new(0, 1, 3), WeightedEdge::new(2, 1, 1)];
        GovernanceGraph::try_new(nodes, edges, EdgeOrientation::Undirected)
            .expect("fixture graph must be valid")
    }

    fn staking_graph() -> GovernanceGraph {
        let nodes = vec![
            Node::new(
                0,
                "0xm",
                NodeAttributes::Staking {
                    member: true,
                    stakes: 4,
                },
            ),
            Node::new(
                1,
                "0xz",
                NodeAttributes::Staking {
                    member: false,
                    stakes: 2,
                },
            ),
        ];
        let edges = vec![WeightedEdge::new(0, 1, 2)];
        GovernanceGraph::try_new(nodes, edges, EdgeOrientation::Undirected)
            .expect("fixture graph must be valid")
    }

    fn round_trip(graph: &GovernanceGraph) -> GovernanceGraph {
        let mut buffer = Vec::new();
        write_gml(graph, &mut buffer).expect("write must succeed");
        let text = String::from_utf8(buffer).expect("gml is utf-8");
        parse_gml(&text).expect("written gml must parse")
    }

    #[test]
    fn reputation_graphs_round_trip_losslessly() {
        let graph = reputation_graph();
        assert_eq!(round_trip(&graph), graph);
    }

    #[test]
    fn staking_graphs_round_trip_losslessly() {
        let graph = staking_graph();
        assert_eq!(round_trip(&graph), graph);
    }

    #[test]
    fn directed_flag_round_trips() {
        let nodes = vec![
            Node::new(0, "0xa", NodeAttributes::Reputation { reputation: 1.5 }),
            Node::new(1, "0xb", NodeAttributes::Reputation { reputation: 2.5 }),
        ];
        let graph = GovernanceGraph::try_new(
            nodes,
            vec![WeightedEdge::new(1, 0, 7)],
            EdgeOrientation::Directed,
        )
        .expect("fixture graph must be valid");
        let parsed = round_trip(&graph);
        assert!(parsed.is_directed());
        assert_eq!(parsed, graph);
    }

    #[test]
    fn unknown_scalar_fields_are_skipped() {
        let text = "graph [\n  creator \"external tool\"\n  node [\n    id 0\n    \
                    hash \"0xa\"\n    reputation 50\n    comment \"kept elsewhere\"\n  ]\n]\n";
        let graph = parse_gml(text).expect("unknown fields must not break parsing");
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn truncated_documents_fail_loudly() {
        let err = parse_gml("graph [ node [ id 0").expect_err("document is truncated");
        assert!(matches!(err, GmlError::UnexpectedEof));
    }

    #[test]
    fn incomplete_edges_are_rejected() {
        let text = "graph [\n  node [ id 0 hash \"0xa\" reputation 0 ]\n  \
                    node [ id 1 hash \"0xb\" reputation 1 ]\n  edge [ source 0 target 1 ]\n]\n";
        let err = parse_gml(text).expect_err("edge lacks weight");
        assert!(matches!(err, GmlError::IncompleteEdge));
    }
}
