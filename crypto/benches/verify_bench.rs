use bitcoin::hashes::{sha256, Hash};
use bitcoin::key::Keypair;
use bitcoin::secp256k1::{Message, Secp256k1, SecretKey};
use bitcoin::sign_message::{signed_msg_hash, MessageSignature};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use froglink_types::{BitcoinNetwork, BtcAddress};

fn taproot_verify_bench(c: &mut Criterion) {
    let secp = Secp256k1::new();
    let sk = SecretKey::from_slice(&[7u8; 32]).unwrap();
    let keypair = Keypair::from_secret_key(&secp, &sk);
    let (xonly, _) = keypair.x_only_public_key();
    let pubkey_hex = hex::encode(xonly.serialize());
    let address = BtcAddress::new(
        froglink_crypto::taproot_address(&xonly, BitcoinNetwork::Mainnet).to_string(),
    );

    let message = "Bitcoin Frogs → Froggys Link\nFrog ID: 42\nInscription: abci0";
    let digest = sha256::Hash::hash(message.as_bytes());
    let msg = Message::from_digest(digest.to_byte_array());
    let sig_hex = hex::encode(secp.sign_schnorr_no_aux_rand(&msg, &keypair).serialize());

    c.bench_function("taproot_verify_link_signature", |b| {
        b.iter(|| {
            froglink_crypto::verify_link_signature(
                black_box(message),
                &address,
                &sig_hex,
                Some(&pubkey_hex),
                BitcoinNetwork::Mainnet,
            )
        })
    });
}

fn segwit_verify_bench(c: &mut Criterion) {
    use base64::Engine;
    let secp = Secp256k1::new();
    let sk = SecretKey::from_slice(&[9u8; 32]).unwrap();
    let pk = bitcoin::key::PublicKey::new(sk.public_key(&secp));
    let compressed = bitcoin::key::CompressedPublicKey::try_from(pk).unwrap();
    let address = BtcAddress::new(
        bitcoin::Address::p2wpkh(compressed, bitcoin::Network::Bitcoin).to_string(),
    );

    let message = "Bitcoin Frogs → Froggys Link\nFrog ID: 7";
    let msg_hash = signed_msg_hash(message);
    let msg = Message::from_digest(msg_hash.to_byte_array());
    let recsig = secp.sign_ecdsa_recoverable(&msg, &sk);
    let sig_b64 = base64::engine::general_purpose::STANDARD
        .encode(MessageSignature::new(recsig, true).serialize());

    c.bench_function("segwit_verify_link_signature", |b| {
        b.iter(|| {
            froglink_crypto::verify_link_signature(
                black_box(message),
                &address,
                &sig_b64,
                None,
                BitcoinNetwork::Mainnet,
            )
        })
    });
}

fn taproot_address_derive_bench(c: &mut Criterion) {
    let secp = Secp256k1::new();
    let sk = SecretKey::from_slice(&[11u8; 32]).unwrap();
    let keypair = Keypair::from_secret_key(&secp, &sk);
    let (xonly, _) = keypair.x_only_public_key();

    c.bench_function("taproot_address_derive", |b| {
        b.iter(|| froglink_crypto::taproot_address(black_box(&xonly), BitcoinNetwork::Mainnet))
    });
}

criterion_group!(
    benches,
    taproot_verify_bench,
    segwit_verify_bench,
    taproot_address_derive_bench,
);
criterion_main!(benches);
