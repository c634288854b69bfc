use crate::{
    default_store::MemStore,
    error::Error,
    fr::Fr,
    identity_tree_store::{IdentityState, IdentityTreeStore, REVOCATION_TREE_DEPTH},
    node::Preimage,
    poseidon_hasher::PoseidonHasher,
    traits::Hasher,
};

type Registry = IdentityTreeStore<MemStore<PoseidonHasher>>;

fn registry() -> Registry {
    IdentityTreeStore::new(MemStore::new())
}

fn fr(n: u64) -> Fr {
    Fr::from(n)
}

fn dec(s: &str) -> Fr {
    Fr::from_dec_str(s).expect("decimal field element")
}

/// Revocation leaves commit to the nonce with value 0.
fn revocation_leaf(nonce: Fr) -> Preimage {
    Preimage::leaf(nonce, Fr::zero())
}

#[test]
fn single_leaf_status() {
    let nonce = fr(1);
    let rev_root = PoseidonHasher::hash3(&nonce, &Fr::zero(), &Fr::one());
    let roots = [fr(1), rev_root, fr(3)];

    let mut registry = registry();
    registry
        .save_nodes(vec![Preimage::Three(roots), revocation_leaf(nonce)])
        .expect("save nodes");

    let issuer = IdentityState::from_roots(&roots).expect("state tuple");
    let by_state = registry
        .revocation_status_by_state(&issuer.hash::<PoseidonHasher>(), nonce)
        .expect("status");
    let by_roots = registry.revocation_status(&roots, nonce).expect("status");
    assert_eq!(by_state, by_roots);

    assert_eq!(by_state.issuer.claims_root, fr(1));
    assert_eq!(by_state.issuer.revocation_root, rev_root);
    assert_eq!(by_state.issuer.root_of_roots, fr(3));

    assert_eq!(by_state.mtp.root, rev_root);
    assert_eq!(by_state.mtp.fnc, 0);
    assert_eq!(by_state.mtp.siblings, vec![Fr::zero(); REVOCATION_TREE_DEPTH]);
    assert_eq!(by_state.mtp.key, nonce);
    assert_eq!(by_state.mtp.value, Fr::zero());
    assert!(by_state.mtp.verify::<PoseidonHasher>());

    // the next nonce is not revoked; the stored leaf turns auxiliary
    let status = registry.revocation_status(&roots, fr(2)).expect("status");
    assert_eq!(status.mtp.fnc, 1);
    assert!(!status.mtp.is_old0);
    assert_eq!(status.mtp.old_key, nonce);
    assert_eq!(status.mtp.old_value, Fr::zero());
    assert_eq!(status.mtp.siblings, vec![Fr::zero(); REVOCATION_TREE_DEPTH]);
    assert!(status.mtp.verify::<PoseidonHasher>());
}

#[test]
fn left_key_path_status() {
    let nonce = fr(2);
    let leaf1 = PoseidonHasher::hash3(&fr(4), &Fr::zero(), &Fr::one());
    let leaf2 = PoseidonHasher::hash3(&nonce, &Fr::zero(), &Fr::one());
    let middle = PoseidonHasher::hash2(&leaf1, &leaf2);
    let rev_root = PoseidonHasher::hash2(&middle, &Fr::zero());
    let roots = [fr(1), rev_root, fr(3)];

    let mut registry = registry();
    registry
        .save_nodes(vec![
            revocation_leaf(fr(4)),
            revocation_leaf(nonce),
            Preimage::Two([leaf1, leaf2]),
            Preimage::Two([middle, Fr::zero()]),
            Preimage::Three(roots),
        ])
        .expect("save nodes");

    let issuer = IdentityState::from_roots(&roots).expect("state tuple");
    let by_state = registry
        .revocation_status_by_state(&issuer.hash::<PoseidonHasher>(), nonce)
        .expect("status");
    let status = registry.revocation_status(&roots, nonce).expect("status");
    assert_eq!(by_state, status);

    assert_eq!(status.mtp.root, rev_root);
    assert_eq!(status.mtp.fnc, 0);
    assert_eq!(status.mtp.value, Fr::zero());
    assert_eq!(status.mtp.siblings[0], Fr::zero());
    assert_eq!(
        status.mtp.siblings[1],
        dec("6949980352176809960902782436662588039414117260217395356682829284808595441653")
    );
    assert_eq!(status.mtp.siblings[1], leaf1);
    assert!(status.mtp.siblings[2..].iter().all(Fr::is_zero));

    // not revoked, with the sibling leaf as auxiliary
    let status = registry.revocation_status(&roots, fr(8)).expect("status");
    assert_eq!(status.mtp.fnc, 1);
    assert!(!status.mtp.is_old0);
    assert_eq!(status.mtp.old_key, fr(4));
    assert_eq!(status.mtp.old_value, Fr::zero());
    assert_eq!(
        status.mtp.siblings[1],
        dec("16893244256367465864542014032080213413654599301942077056250173615273598292583")
    );
    assert_eq!(status.mtp.siblings[1], leaf2);

    // not revoked, empty slot
    let status = registry.revocation_status(&roots, fr(1)).expect("status");
    assert_eq!(status.mtp.fnc, 1);
    assert!(status.mtp.is_old0);
    assert_eq!(status.mtp.old_key, Fr::zero());
    assert_eq!(
        status.mtp.siblings[0],
        dec("4923219850055277158065523309848923357324823470193729569414506026481393416506")
    );
    assert_eq!(status.mtp.siblings[0], middle);
}

#[test]
fn right_key_path_status() {
    let nonce = fr(1);
    let leaf1 = PoseidonHasher::hash3(&fr(3), &Fr::zero(), &Fr::one());
    let leaf2 = PoseidonHasher::hash3(&nonce, &Fr::zero(), &Fr::one());
    let middle = PoseidonHasher::hash2(&leaf2, &leaf1);
    let rev_root = PoseidonHasher::hash2(&Fr::zero(), &middle);
    let roots = [fr(1), rev_root, fr(3)];

    let mut registry = registry();
    registry
        .save_nodes(vec![
            revocation_leaf(fr(3)),
            revocation_leaf(nonce),
            Preimage::Two([leaf2, leaf1]),
            Preimage::Two([Fr::zero(), middle]),
            Preimage::Three(roots),
        ])
        .expect("save nodes");

    let status = registry.revocation_status(&roots, nonce).expect("status");
    assert_eq!(status.mtp.root, rev_root);
    assert_eq!(status.mtp.fnc, 0);
    assert_eq!(status.mtp.siblings[0], Fr::zero());
    assert_eq!(
        status.mtp.siblings[1],
        dec("18055627789841181316500608856722684043944115961354987268304016120532204822528")
    );
    assert_eq!(status.mtp.siblings[1], leaf1);

    let status = registry.revocation_status(&roots, fr(7)).expect("status");
    assert_eq!(status.mtp.fnc, 1);
    assert_eq!(status.mtp.old_key, fr(3));
    assert_eq!(
        status.mtp.siblings[1],
        dec("19374975721259875597650302716689543547647001662517455822229477759190533109280")
    );
    assert_eq!(status.mtp.siblings[1], leaf2);

    let status = registry.revocation_status(&roots, fr(2)).expect("status");
    assert_eq!(status.mtp.fnc, 1);
    assert!(status.mtp.is_old0);
    assert_eq!(
        status.mtp.siblings[0],
        dec("18003115155595189826451073637653199212465749960078311721824394167192960280094")
    );
    assert_eq!(status.mtp.siblings[0], middle);
}

#[test]
fn state_tuple_must_have_three_roots() {
    let mut registry = registry();
    registry
        .save_nodes(vec![Preimage::Two([fr(1), fr(2)])])
        .expect("save nodes");
    let state = PoseidonHasher::hash2(&fr(1), &fr(2));

    assert_eq!(
        registry.revocation_status_by_state(&state, fr(12345)),
        Err(Error::InvalidRootsLength {
            expected: 3,
            actual: 2
        })
    );
    assert_eq!(
        registry.revocation_status(&[fr(1), fr(2)], fr(12345)),
        Err(Error::InvalidRootsLength {
            expected: 3,
            actual: 2
        })
    );
    assert_eq!(
        registry.revocation_status(&[fr(1), fr(2), fr(3), fr(4)], fr(12345)),
        Err(Error::InvalidRootsLength {
            expected: 3,
            actual: 4
        })
    );
}

#[test]
fn missing_nodes_surface_as_errors() {
    let registry = registry();
    let unknown = fr(777);
    assert_eq!(
        registry.revocation_status_by_state(&unknown, fr(1)),
        Err(Error::NodeNotFound(unknown))
    );

    // a state tuple pointing at an unpublished revocation tree
    let status = registry.revocation_status(&[fr(1), unknown, fr(3)], fr(1));
    assert_eq!(status, Err(Error::NodeNotFound(unknown)));
}
