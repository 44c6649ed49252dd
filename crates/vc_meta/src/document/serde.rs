use core::fmt;

use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, Serializer};

use crate::document::{Block, DocNode};

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for DocNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocNode::Null => serializer.serialize_unit(),
            DocNode::Bool(value) => serializer.serialize_bool(*value),
            DocNode::Int(value) => serializer.serialize_i64(*value),
            DocNode::Float(value) => serializer.serialize_f64(*value),
            DocNode::String(value) => serializer.serialize_str(value),
            DocNode::Array(items) => serializer.collect_seq(items),
            DocNode::Block(block) => block.serialize(serializer),
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, node) in self.iter() {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = DocNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a document value")
    }

    #[inline]
    fn visit_bool<E: de::Error>(self, v: bool) -> Result<DocNode, E> {
        Ok(DocNode::Bool(v))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DocNode, E> {
        Ok(DocNode::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DocNode, E> {
        Ok(match i64::try_from(v) {
            Ok(v) => DocNode::Int(v),
            Err(_) => DocNode::Float(v as f64),
        })
    }

    #[inline]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<DocNode, E> {
        Ok(DocNode::Float(v))
    }

    #[inline]
    fn visit_str<E: de::Error>(self, v: &str) -> Result<DocNode, E> {
        Ok(DocNode::String(v.into()))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, v: String) -> Result<DocNode, E> {
        Ok(DocNode::String(v))
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<DocNode, E> {
        Ok(DocNode::Null)
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<DocNode, E> {
        Ok(DocNode::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<DocNode, D::Error> {
        DocNode::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DocNode, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(1024));
        while let Some(item) = seq.next_element::<DocNode>()? {
            items.push(item);
        }
        Ok(DocNode::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DocNode, A::Error> {
        let mut block = Block::new();
        while let Some((key, node)) = map.next_entry::<String, DocNode>()? {
            block.insert(key, node);
        }
        Ok(DocNode::Block(block))
    }
}

impl<'de> Deserialize<'de> for DocNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match deserializer.deserialize_map(NodeVisitor)? {
            DocNode::Block(block) => Ok(block),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(&other.kind().to_string()),
                &"a block",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{Block, DocNode};

    fn sample() -> DocNode {
        DocNode::Block(
            [
                ("visible", DocNode::Bool(true)),
                ("layer", DocNode::Int(-3)),
                ("zoom", DocNode::Float(0.75)),
                ("name", DocNode::String("camera".into())),
                (
                    "targets",
                    DocNode::Array(vec![DocNode::Block(
                        [("uid", DocNode::Int(42))].into_iter().collect(),
                    )]),
                ),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn json_text_keeps_field_order() {
        let text = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            text,
            r#"{"visible":true,"layer":-3,"zoom":0.75,"name":"camera","targets":[{"uid":42}]}"#
        );
        let back: DocNode = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn ron_text_reads_back() {
        let text = ron::to_string(&sample()).unwrap();
        let back: DocNode = ron::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn json_null_reads_as_null() {
        let doc: DocNode = serde_json::from_str(r#"{"a":null}"#).unwrap();
        assert_eq!(doc.get("a"), Some(&DocNode::Null));
    }

    #[test]
    fn block_rejects_scalars() {
        assert!(serde_json::from_str::<Block>("3").is_err());
        let block: Block = serde_json::from_str(r#"{"x":1}"#).unwrap();
        assert_eq!(block.get("x"), Some(&DocNode::Int(1)));
    }
}
