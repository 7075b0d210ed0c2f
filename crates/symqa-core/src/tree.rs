//! Bracketed constituency tree reader.
//!
//! Reads the one-line Penn-style output of constituency parsers, e.g.
//! `(ROOT (S (NP (N Ana)) (VP (V dorme))))`, into a labeled tree. A node may
//! carry several bare leaves (`(NP o gato)`), and a node may have an empty
//! label (`( (S ...))`), both of which some grammars emit.

use std::str::FromStr;

use crate::error::TreeError;

/// A child of a tree node: either a nested subtree or a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Tree(Tree),
    Leaf(String),
}

/// A labeled tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    label: String,
    children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

fn lex(input: &str) -> Vec<(usize, Token<'_>)> {
    let mut tokens = Vec::new();
    let mut atom_start: Option<usize> = None;

    for (i, ch) in input.char_indices() {
        let is_delimiter = ch == '(' || ch == ')' || ch.is_whitespace();
        if is_delimiter {
            if let Some(start) = atom_start.take() {
                tokens.push((start, Token::Atom(&input[start..i])));
            }
            match ch {
                '(' => tokens.push((i, Token::Open)),
                ')' => tokens.push((i, Token::Close)),
                _ => {}
            }
        } else if atom_start.is_none() {
            atom_start = Some(i);
        }
    }
    if let Some(start) = atom_start {
        tokens.push((start, Token::Atom(&input[start..])));
    }

    tokens
}

impl Tree {
    pub fn new(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct children that are subtrees.
    pub fn child_trees(&self) -> impl Iterator<Item = &Tree> {
        self.children.iter().filter_map(|child| match child {
            Node::Tree(tree) => Some(tree),
            Node::Leaf(_) => None,
        })
    }

    /// All words under this node, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            match child {
                Node::Tree(tree) => tree.collect_leaves(out),
                Node::Leaf(word) => out.push(word),
            }
        }
    }

    /// The words under this node joined by single spaces.
    pub fn text(&self) -> String {
        self.leaves().join(" ")
    }

    /// This node and every descendant subtree, in pre-order.
    pub fn subtrees(&self) -> Vec<&Tree> {
        let mut out = Vec::new();
        self.collect_subtrees(&mut out);
        out
    }

    fn collect_subtrees<'a>(&'a self, out: &mut Vec<&'a Tree>) {
        out.push(self);
        for child in self.child_trees() {
            child.collect_subtrees(out);
        }
    }

    /// Read a tree from its bracketed representation.
    pub fn parse(input: &str) -> Result<Tree, TreeError> {
        let tokens = lex(input);
        let mut stack: Vec<Tree> = Vec::new();
        let mut root: Option<Tree> = None;
        let mut iter = tokens.into_iter().peekable();

        while let Some((position, token)) = iter.next() {
            if root.is_some() {
                return Err(TreeError::TrailingInput(position));
            }
            match token {
                Token::Open => {
                    let label = match iter.peek() {
                        Some((_, Token::Atom(label))) => {
                            let label = label.to_string();
                            iter.next();
                            label
                        }
                        _ => String::new(),
                    };
                    stack.push(Tree::new(label, Vec::new()));
                }
                Token::Close => {
                    let Some(done) = stack.pop() else {
                        return Err(TreeError::Unexpected {
                            found: ")".into(),
                            position,
                        });
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Tree(done)),
                        None => root = Some(done),
                    }
                }
                Token::Atom(word) => match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Leaf(word.to_string())),
                    None => {
                        return Err(TreeError::Unexpected {
                            found: word.to_string(),
                            position,
                        })
                    }
                },
            }
        }

        if !stack.is_empty() {
            return Err(TreeError::Unclosed(stack.len()));
        }
        root.ok_or(TreeError::Empty)
    }
}

impl FromStr for Tree {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tree::parse(s)
    }
}
