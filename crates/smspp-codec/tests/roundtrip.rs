//! File-level round-trip coverage for the container codec.

use smspp_codec::{load, save};
use smspp_model::{
    AttrValue, DuplicatePolicy, SMSFileType, SMSNetwork, VarData, Variable,
};

/// Builds a unit-commitment problem the way a caller assembling a real
/// model would: one UCBlock with a demand profile and a thermal unit.
fn uc_network() -> SMSNetwork {
    let mut net = SMSNetwork::new(SMSFileType::BlockFile);
    let uc = net
        .root_mut()
        .add_child("UCBlock", "Block_0", Vec::new(), DuplicatePolicy::Reject)
        .unwrap();
    uc.add_dimension("TimeHorizon", 24, DuplicatePolicy::Reject)
        .unwrap();
    uc.add_dimension("NumberUnits", 1, DuplicatePolicy::Reject)
        .unwrap();
    uc.add_dimension("NumberNodes", 1, DuplicatePolicy::Reject)
        .unwrap();
    uc.add_variable(
        Variable::new(
            "ActivePowerDemand",
            vec!["NumberNodes".to_string(), "TimeHorizon".to_string()],
            VarData::Float(ndarray::ArrayD::from_elem(ndarray::IxDyn(&[1, 24]), 50.0)),
        ),
        DuplicatePolicy::Reject,
    )
    .unwrap();
    uc.add_child(
        "ThermalUnitBlock",
        "UnitBlock_0",
        vec![
            (
                "MinPower".to_string(),
                Variable::scalar_float("MinPower", 0.0).into(),
            ),
            (
                "MaxPower".to_string(),
                Variable::scalar_float("MaxPower", 100.0).into(),
            ),
            (
                "LinearTerm".to_string(),
                Variable::scalar_float("LinearTerm", 0.3).into(),
            ),
        ],
        DuplicatePolicy::Reject,
    )
    .unwrap();
    net
}

#[test]
fn save_then_load_preserves_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("uc.smsc");

    let net = uc_network();
    save(&net, &path).unwrap();
    let back = load(&path).unwrap();

    assert_eq!(back, net);
    assert_eq!(back.file_type().unwrap(), SMSFileType::BlockFile);

    let uc = back.root().block("Block_0").unwrap();
    assert_eq!(uc.block_type(), Some("UCBlock"));
    assert_eq!(uc.dimension("TimeHorizon"), Some(24));
    assert_eq!(uc.dimension("NumberNodes"), Some(1));

    let demand = uc.variable("ActivePowerDemand").unwrap();
    assert_eq!(demand.data.shape(), &[1, 24]);
    match &demand.data {
        VarData::Float(arr) => assert!(arr.iter().all(|v| *v == 50.0)),
        other => panic!("unexpected dtype: {:?}", other.dtype()),
    }

    let unit = uc.block("UnitBlock_0").unwrap();
    assert_eq!(unit.block_type(), Some("ThermalUnitBlock"));
    assert_eq!(
        unit.variable("MaxPower").unwrap().data,
        VarData::scalar_float(100.0)
    );
}

#[test]
fn load_preserves_component_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ordered.smsc");

    let mut net = SMSNetwork::new(SMSFileType::BlockFile);
    for name in ["zeta", "alpha", "mid"] {
        net.root_mut()
            .add_attribute(name, AttrValue::Int(0), DuplicatePolicy::Reject)
            .unwrap();
    }
    save(&net, &path).unwrap();
    let back = load(&path).unwrap();
    let names: Vec<&str> = back
        .root()
        .attributes()
        .keys()
        .map(String::as_str)
        .filter(|n| *n != smspp_model::FILE_TYPE_ATTR)
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("absent.smsc")).unwrap_err();
    assert_eq!(err.code(), "CODEC_IO");
}
