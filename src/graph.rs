use std::collections::HashMap;
use std::io::BufReader;

use sophia::api::prelude::*;

use crate::error::MetaError;

pub const BDR: &str = "http://purl.bdrc.io/resource/";
pub const BDO: &str = "http://purl.bdrc.io/ontology/core/";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const INSTANCE_HAS_VOLUME: &str = "http://purl.bdrc.io/ontology/core/instanceHasVolume";
pub const VOLUME_NUMBER: &str = "http://purl.bdrc.io/ontology/core/volumeNumber";
pub const VOLUME_PAGES_TOTAL: &str = "http://purl.bdrc.io/ontology/core/volumePagesTotal";

/// Object position of a triple, reduced to the two term kinds the
/// extractor cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphObject {
    Iri(String),
    Literal(String),
}

impl GraphObject {
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            GraphObject::Iri(iri) => Some(iri),
            GraphObject::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            GraphObject::Iri(_) => None,
            GraphObject::Literal(lexical) => Some(lexical),
        }
    }
}

/// A work's relation graph, indexed as `(subject IRI, predicate IRI)` to
/// the objects in statement order. Built once per extraction and
/// discarded; not a general triple store.
#[derive(Debug, Default)]
pub struct RelationGraph {
    index: HashMap<(String, String), Vec<GraphObject>>,
}

impl RelationGraph {
    /// Parses Turtle text into the lookup index. Triples whose subject or
    /// predicate is not an IRI (blank nodes, quoted triples) are skipped.
    pub fn parse_turtle(text: &str) -> Result<Self, MetaError> {
        let reader = BufReader::new(std::io::Cursor::new(text.as_bytes()));
        let mut index: HashMap<(String, String), Vec<GraphObject>> = HashMap::new();
        let mut parser = sophia::turtle::parser::turtle::parse_bufread(reader);
        parser
            .for_each_triple(|t| {
                let s = t.s();
                let Some(subject) = s.iri() else { return };
                let p = t.p();
                let Some(predicate) = p.iri() else { return };
                let object = if let Some(iri) = t.o().iri() {
                    GraphObject::Iri(iri.as_str().to_string())
                } else if let Some(lexical) = t.o().lexical_form() {
                    GraphObject::Literal(lexical.to_string())
                } else {
                    return;
                };
                index
                    .entry((subject.as_str().to_string(), predicate.as_str().to_string()))
                    .or_default()
                    .push(object);
            })
            .map_err(|err| MetaError::GraphSyntax(err.to_string()))?;
        Ok(Self { index })
    }

    /// All objects of `(subject, predicate)`, in statement order.
    pub fn objects(&self, subject: &str, predicate: &str) -> &[GraphObject] {
        self.index
            .get(&(subject.to_string(), predicate.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First object of `(subject, predicate)`, if any.
    pub fn value(&self, subject: &str, predicate: &str) -> Option<&GraphObject> {
        self.objects(subject, predicate).first()
    }
}

/// Full IRI of a node in the BDRC resource namespace.
pub fn resource(id: &str) -> String {
    format!("{BDR}{id}")
}
